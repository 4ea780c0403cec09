//! Unit of work port
//!
//! A unit of work owns the persistence session for one logical operation.
//! Repositories handed out by it share that session, stage their writes in
//! its `ChangeTracker`, and see those writes land together on `commit`.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::entities::{
    Course, CourseId, Exam, ExamId, ExamResult, ExamResultId, Instructor, InstructorId, Lesson,
    LessonId, Registration, RegistrationId, Student, StudentId,
};
use crate::domain::ports::{DetailRepository, Repository};
use crate::error::DomainError;

/// An aggregate staged for insert or update
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Student(Student),
    Instructor(Instructor),
    Course(Course),
    Lesson(Lesson),
    Exam(Exam),
    ExamResult(ExamResult),
    Registration(Registration),
}

/// Identifier of an aggregate staged for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Student(StudentId),
    Instructor(InstructorId),
    Course(CourseId),
    Lesson(LessonId),
    Exam(ExamId),
    ExamResult(ExamResultId),
    Registration(RegistrationId),
}

/// Run `$body` with `$entity` bound to the aggregate inside a `Record`
macro_rules! with_record {
    ($record:expr, $entity:ident => $body:expr) => {
        match $record {
            $crate::domain::ports::Record::Student($entity) => $body,
            $crate::domain::ports::Record::Instructor($entity) => $body,
            $crate::domain::ports::Record::Course($entity) => $body,
            $crate::domain::ports::Record::Lesson($entity) => $body,
            $crate::domain::ports::Record::Exam($entity) => $body,
            $crate::domain::ports::Record::ExamResult($entity) => $body,
            $crate::domain::ports::Record::Registration($entity) => $body,
        }
    };
}

pub(crate) use with_record;

/// A write waiting for the next commit
#[derive(Debug, Clone, PartialEq)]
pub enum PendingChange {
    Insert(Record),
    Update(Record),
    Delete(RecordKey),
}

/// Ordered list of writes staged since the last commit
#[derive(Debug, Default)]
pub struct ChangeTracker {
    pending: Mutex<Vec<PendingChange>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self, change: PendingChange) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change);
    }

    /// Take every staged change, leaving the tracker empty
    pub fn drain(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn clear(&self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Transactional boundary over every repository.
///
/// Scoped to one logical operation; never share an instance between
/// requests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn students(&self) -> &dyn Repository<Student>;
    fn instructors(&self) -> &dyn Repository<Instructor>;
    fn courses(&self) -> &dyn Repository<Course>;
    fn lessons(&self) -> &dyn Repository<Lesson>;
    fn exams(&self) -> &dyn Repository<Exam>;
    fn exam_results(&self) -> &dyn Repository<ExamResult>;
    fn registrations(&self) -> &dyn Repository<Registration>;

    fn course_details(&self) -> &dyn DetailRepository<Course>;
    fn lesson_details(&self) -> &dyn DetailRepository<Lesson>;
    fn exam_result_details(&self) -> &dyn DetailRepository<ExamResult>;
    fn registration_details(&self) -> &dyn DetailRepository<Registration>;

    /// Flush all staged writes and return the number of rows they touched.
    ///
    /// Runs inside the explicit transaction when one is open; otherwise the
    /// flush is atomic on its own.
    async fn commit(&self) -> Result<u64, DomainError>;

    /// Open the explicit transaction. Use `TransactionHandle::begin` instead.
    async fn open_transaction(&self) -> Result<(), DomainError>;

    async fn commit_transaction(&self) -> Result<(), DomainError>;

    async fn rollback_transaction(&self) -> Result<(), DomainError>;

    /// Synchronous rollback for handles released without being settled.
    /// Must not block; discards staged writes too.
    fn abandon_transaction(&self);
}

/// Creates a fresh unit of work per logical operation
pub trait UnitOfWorkFactory: Send + Sync + 'static {
    type Unit: UnitOfWork + 'static;

    fn create(&self) -> Self::Unit;
}

/// Explicit atomic scope over a unit of work.
///
/// Exactly one of `commit` or `rollback` should be called. A handle dropped
/// without either (early return, panic, or the surrounding future being
/// cancelled) rolls the transaction back.
pub struct TransactionHandle<'a> {
    unit: &'a dyn UnitOfWork,
    settled: bool,
}

impl<'a> TransactionHandle<'a> {
    pub async fn begin(unit: &'a dyn UnitOfWork) -> Result<Self, DomainError> {
        unit.open_transaction().await?;
        Ok(Self {
            unit,
            settled: false,
        })
    }

    pub async fn commit(mut self) -> Result<(), DomainError> {
        let result = self.unit.commit_transaction().await;
        self.settled = true;
        result
    }

    pub async fn rollback(mut self) -> Result<(), DomainError> {
        let result = self.unit.rollback_transaction().await;
        self.settled = true;
        result
    }
}

impl Drop for TransactionHandle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Transaction released without commit or rollback, rolling back");
            self.unit.abandon_transaction();
        }
    }
}
