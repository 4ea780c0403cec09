//! SeaORM unit of work
//!
//! Writes are staged in memory and sent to PostgreSQL on `commit`, inside the
//! explicit transaction when one is open and inside a short implicit one
//! otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait};

use super::session::{db_error, insert_row, update_row, Persisted, Session};
use super::{
    PostgresCourseRepository, PostgresExamRepository, PostgresExamResultRepository,
    PostgresInstructorRepository, PostgresLessonRepository, PostgresRegistrationRepository,
    PostgresStudentRepository,
};
use crate::domain::entities::{
    Course, Exam, ExamResult, Instructor, Lesson, Registration, Student,
};
use crate::domain::ports::unit_of_work::with_record;
use crate::domain::ports::{
    DetailRepository, PendingChange, RecordKey, Repository, UnitOfWork, UnitOfWorkFactory,
};
use crate::entity::{courses, exam_results, exams, instructors, lessons, registrations, students};
use crate::error::DomainError;

pub struct SeaOrmUnitOfWork {
    session: Arc<Session>,
    students: PostgresStudentRepository,
    instructors: PostgresInstructorRepository,
    courses: PostgresCourseRepository,
    lessons: PostgresLessonRepository,
    exams: PostgresExamRepository,
    exam_results: PostgresExamResultRepository,
    registrations: PostgresRegistrationRepository,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        let session = Arc::new(Session::new(db));
        Self {
            students: PostgresStudentRepository::new(session.clone()),
            instructors: PostgresInstructorRepository::new(session.clone()),
            courses: PostgresCourseRepository::new(session.clone()),
            lessons: PostgresLessonRepository::new(session.clone()),
            exams: PostgresExamRepository::new(session.clone()),
            exam_results: PostgresExamResultRepository::new(session.clone()),
            registrations: PostgresRegistrationRepository::new(session.clone()),
            session,
        }
    }
}

async fn apply<C: ConnectionTrait>(db: &C, changes: Vec<PendingChange>) -> Result<u64, DbErr> {
    let mut affected = 0;
    for change in changes {
        affected += match change {
            PendingChange::Insert(record) => {
                with_record!(record, entity => insert_row(db, entity.to_active_model()).await?)
            }
            PendingChange::Update(record) => {
                with_record!(record, entity => update_row(db, entity.to_active_model()).await?)
            }
            PendingChange::Delete(key) => delete_row(db, key).await?,
        };
    }
    Ok(affected)
}

async fn delete_row<C: ConnectionTrait>(db: &C, key: RecordKey) -> Result<u64, DbErr> {
    let result = match key {
        RecordKey::Student(id) => students::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::Instructor(id) => instructors::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::Course(id) => courses::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::Lesson(id) => lessons::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::Exam(id) => exams::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::ExamResult(id) => exam_results::Entity::delete_by_id(id.0).exec(db).await?,
        RecordKey::Registration(id) => {
            registrations::Entity::delete_by_id(id.0).exec(db).await?
        }
    };
    Ok(result.rows_affected)
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn students(&self) -> &dyn Repository<Student> {
        &self.students
    }

    fn instructors(&self) -> &dyn Repository<Instructor> {
        &self.instructors
    }

    fn courses(&self) -> &dyn Repository<Course> {
        &self.courses
    }

    fn lessons(&self) -> &dyn Repository<Lesson> {
        &self.lessons
    }

    fn exams(&self) -> &dyn Repository<Exam> {
        &self.exams
    }

    fn exam_results(&self) -> &dyn Repository<ExamResult> {
        &self.exam_results
    }

    fn registrations(&self) -> &dyn Repository<Registration> {
        &self.registrations
    }

    fn course_details(&self) -> &dyn DetailRepository<Course> {
        &self.courses
    }

    fn lesson_details(&self) -> &dyn DetailRepository<Lesson> {
        &self.lessons
    }

    fn exam_result_details(&self) -> &dyn DetailRepository<ExamResult> {
        &self.exam_results
    }

    fn registration_details(&self) -> &dyn DetailRepository<Registration> {
        &self.registrations
    }

    async fn commit(&self) -> Result<u64, DomainError> {
        let changes = self.session.changes.drain();
        if changes.is_empty() {
            return Ok(0);
        }
        tracing::debug!(changes = changes.len(), "Flushing staged changes");

        let transaction = self.session.transaction.lock().await;
        match transaction.as_ref() {
            Some(txn) => apply(txn, changes).await.map_err(db_error),
            None => {
                // Dropping `txn` on the error path rolls the flush back
                let txn = self.session.connection.begin().await.map_err(db_error)?;
                let affected = apply(&txn, changes).await.map_err(db_error)?;
                txn.commit().await.map_err(db_error)?;
                Ok(affected)
            }
        }
    }

    async fn open_transaction(&self) -> Result<(), DomainError> {
        let mut transaction = self.session.transaction.lock().await;
        if transaction.is_some() {
            return Err(DomainError::Conflict(
                "a transaction is already open".to_string(),
            ));
        }
        *transaction = Some(self.session.connection.begin().await.map_err(db_error)?);
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<(), DomainError> {
        let txn = self.session.transaction.lock().await.take();
        match txn {
            Some(txn) => txn.commit().await.map_err(db_error),
            None => Err(DomainError::Conflict("no open transaction".to_string())),
        }
    }

    async fn rollback_transaction(&self) -> Result<(), DomainError> {
        self.session.changes.clear();
        let txn = self.session.transaction.lock().await.take();
        match txn {
            Some(txn) => txn.rollback().await.map_err(db_error),
            None => Err(DomainError::Conflict("no open transaction".to_string())),
        }
    }

    fn abandon_transaction(&self) {
        self.session.changes.clear();
        match self.session.transaction.try_lock() {
            // SeaORM queues a rollback when a transaction is dropped
            Ok(mut transaction) => drop(transaction.take()),
            Err(_) => tracing::debug!(
                "Session busy, transaction will roll back when the unit of work is released"
            ),
        }
    }
}

/// Hands out a fresh unit of work over the shared connection pool
#[derive(Clone)]
pub struct SeaOrmUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UnitOfWorkFactory for SeaOrmUnitOfWorkFactory {
    type Unit = SeaOrmUnitOfWork;

    fn create(&self) -> SeaOrmUnitOfWork {
        SeaOrmUnitOfWork::new(self.db.clone())
    }
}
