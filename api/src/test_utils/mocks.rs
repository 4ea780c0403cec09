//! In-memory unit of work
//!
//! A single `InMemoryStore` holds every table. Units of work created from it
//! stage writes in their own `ChangeTracker` and apply them on commit, the
//! same way the PostgreSQL adapter does. The store counts what happens to it
//! so tests can assert on round trips, staged writes and open transactions.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::entities::{
    Aggregate, Course, CourseDetail, Exam, ExamResult, ExamResultDetail, Instructor, Lesson,
    LessonDetail, Registration, RegistrationDetail, Student,
};
use crate::domain::ports::unit_of_work::with_record;
use crate::domain::ports::{
    ChangeTracker, DetailRepository, PendingChange, RecordKey, Repository, UnitOfWork,
    UnitOfWorkFactory,
};
use crate::error::DomainError;

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Tables {
    students: BTreeMap<<Student as Aggregate>::Id, Student>,
    instructors: BTreeMap<<Instructor as Aggregate>::Id, Instructor>,
    courses: BTreeMap<<Course as Aggregate>::Id, Course>,
    lessons: BTreeMap<<Lesson as Aggregate>::Id, Lesson>,
    exams: BTreeMap<<Exam as Aggregate>::Id, Exam>,
    exam_results: BTreeMap<<ExamResult as Aggregate>::Id, ExamResult>,
    registrations: BTreeMap<<Registration as Aggregate>::Id, Registration>,
}

/// An aggregate with a table in the in-memory store
pub trait Stored: Aggregate {
    fn table(tables: &Tables) -> &BTreeMap<Self::Id, Self>;
    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Id, Self>;
}

macro_rules! stored {
    ($entity:ty, $field:ident) => {
        impl Stored for $entity {
            fn table(tables: &Tables) -> &BTreeMap<Self::Id, Self> {
                &tables.$field
            }

            fn table_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Id, Self> {
                &mut tables.$field
            }
        }
    };
}

stored!(Student, students);
stored!(Instructor, instructors);
stored!(Course, courses);
stored!(Lesson, lessons);
stored!(Exam, exams);
stored!(ExamResult, exam_results);
stored!(Registration, registrations);

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    queries: AtomicUsize,
    staged: AtomicUsize,
    commits: AtomicUsize,
    open_transactions: AtomicUsize,
    fail_commits: AtomicBool,
    discard_writes: AtomicBool,
    stall_commits: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a row for testing
    pub fn with<E: Stored>(self, entity: E) -> Self {
        self.insert(entity);
        self
    }

    /// Write a row directly, bypassing any unit of work
    pub fn insert<E: Stored>(&self, entity: E) {
        let mut tables = self.tables.write().unwrap();
        E::table_mut(&mut tables).insert(entity.id(), entity);
    }

    /// Read a row directly; not counted as a query
    pub fn get<E: Stored>(&self, id: E::Id) -> Option<E> {
        let tables = self.tables.read().unwrap();
        E::table(&tables).get(&id).cloned()
    }

    pub fn count<E: Stored>(&self) -> usize {
        let tables = self.tables.read().unwrap();
        E::table(&tables).len()
    }

    /// Round trips issued by repositories
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Writes staged through repositories
    pub fn staged(&self) -> usize {
        self.staged.load(Ordering::SeqCst)
    }

    /// Flushes that reached the store
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn open_transactions(&self) -> usize {
        self.open_transactions.load(Ordering::SeqCst)
    }

    /// Make every commit fail with a storage error
    pub fn fail_commits(&self, enabled: bool) {
        self.fail_commits.store(enabled, Ordering::SeqCst);
    }

    /// Make every commit succeed without touching any row
    pub fn discard_writes(&self, enabled: bool) {
        self.discard_writes.store(enabled, Ordering::SeqCst);
    }

    /// Make every commit apply its writes and then never return
    pub fn stall_commits(&self, enabled: bool) {
        self.stall_commits.store(enabled, Ordering::SeqCst);
    }

    fn count_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Tables {
        self.tables.read().unwrap().clone()
    }

    fn restore(&self, snapshot: Tables) {
        *self.tables.write().unwrap() = snapshot;
    }

    fn flush(&self, changes: Vec<PendingChange>) -> Result<u64, DomainError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(DomainError::Database(
                "connection reset by peer".to_string(),
            ));
        }
        if self.discard_writes.load(Ordering::SeqCst) {
            return Ok(0);
        }

        // All or nothing: work on a copy and swap it in once every change applied
        let mut tables = self.tables.write().unwrap();
        let mut working = tables.clone();
        let mut affected = 0;
        for change in changes {
            affected += apply(&mut working, change)?;
        }
        *tables = working;
        Ok(affected)
    }
}

fn apply(tables: &mut Tables, change: PendingChange) -> Result<u64, DomainError> {
    match change {
        PendingChange::Insert(record) => with_record!(record, entity => insert_row(tables, entity)),
        PendingChange::Update(record) => with_record!(record, entity => update_row(tables, entity)),
        PendingChange::Delete(key) => Ok(match key {
            RecordKey::Student(id) => remove_row::<Student>(tables, id),
            RecordKey::Instructor(id) => remove_row::<Instructor>(tables, id),
            RecordKey::Course(id) => remove_row::<Course>(tables, id),
            RecordKey::Lesson(id) => remove_row::<Lesson>(tables, id),
            RecordKey::Exam(id) => remove_row::<Exam>(tables, id),
            RecordKey::ExamResult(id) => remove_row::<ExamResult>(tables, id),
            RecordKey::Registration(id) => remove_row::<Registration>(tables, id),
        }),
    }
}

fn insert_row<E: Stored>(tables: &mut Tables, entity: E) -> Result<u64, DomainError> {
    let table = E::table_mut(tables);
    if table.contains_key(&entity.id()) {
        return Err(DomainError::Database(format!(
            "duplicate key {} in {}",
            entity.id(),
            E::NAME
        )));
    }
    table.insert(entity.id(), entity);
    Ok(1)
}

fn update_row<E: Stored>(tables: &mut Tables, entity: E) -> Result<u64, DomainError> {
    match E::table_mut(tables).get_mut(&entity.id()) {
        Some(row) => {
            *row = entity;
            Ok(1)
        }
        None => Ok(0),
    }
}

fn remove_row<E: Stored>(tables: &mut Tables, id: E::Id) -> u64 {
    match E::table_mut(tables).remove(&id) {
        Some(_) => 1,
        None => 0,
    }
}

fn missing(owner: &str, reference: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::Database(format!("{} references missing {} {}", owner, reference, id))
}

// ============================================================================
// Repositories
// ============================================================================

pub struct InMemoryRepository<E: Stored> {
    store: Arc<InMemoryStore>,
    changes: Arc<ChangeTracker>,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Stored> InMemoryRepository<E> {
    fn new(store: Arc<InMemoryStore>, changes: Arc<ChangeTracker>) -> Self {
        Self {
            store,
            changes,
            _entity: std::marker::PhantomData,
        }
    }

    fn stage(&self, change: PendingChange) {
        self.store.staged.fetch_add(1, Ordering::SeqCst);
        self.changes.stage(change);
    }
}

#[async_trait]
impl<E: Stored> Repository<E> for InMemoryRepository<E> {
    async fn get_all(&self, _track: bool) -> Result<Vec<E>, DomainError> {
        self.store.count_query();
        let tables = self.store.tables.read().unwrap();
        Ok(E::table(&tables).values().cloned().collect())
    }

    async fn get_by_id(&self, id: E::Id, _track: bool) -> Result<Option<E>, DomainError> {
        self.store.count_query();
        let tables = self.store.tables.read().unwrap();
        Ok(E::table(&tables).get(&id).cloned())
    }

    fn create(&self, entity: E) {
        self.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: E) {
        self.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: E::Id) {
        self.stage(PendingChange::Delete(E::record_key(id)));
    }
}

/// Detail reads for every aggregate that has one.
///
/// Each read costs one query per table it touches, however many rows come back.
pub struct InMemoryDetailRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryDetailRepository {
    fn read(&self, tables_touched: usize) -> std::sync::RwLockReadGuard<'_, Tables> {
        for _ in 0..tables_touched {
            self.store.count_query();
        }
        self.store.tables.read().unwrap()
    }
}

fn course_detail(tables: &Tables, course: &Course) -> Result<CourseDetail, DomainError> {
    let instructor = tables
        .instructors
        .get(&course.instructor_id)
        .ok_or_else(|| missing("course", "instructor", course.instructor_id))?;
    Ok(CourseDetail {
        course: course.clone(),
        instructor: instructor.clone(),
    })
}

fn lesson_detail(tables: &Tables, lesson: &Lesson) -> Result<LessonDetail, DomainError> {
    let course = tables
        .courses
        .get(&lesson.course_id)
        .ok_or_else(|| missing("lesson", "course", lesson.course_id))?;
    Ok(LessonDetail {
        lesson: lesson.clone(),
        course: course.clone(),
    })
}

fn exam_result_detail(
    tables: &Tables,
    result: &ExamResult,
) -> Result<ExamResultDetail, DomainError> {
    let student = tables
        .students
        .get(&result.student_id)
        .ok_or_else(|| missing("exam result", "student", result.student_id))?;
    let exam = tables
        .exams
        .get(&result.exam_id)
        .ok_or_else(|| missing("exam result", "exam", result.exam_id))?;
    Ok(ExamResultDetail {
        result: result.clone(),
        student: student.clone(),
        exam: exam.clone(),
    })
}

fn registration_detail(
    tables: &Tables,
    registration: &Registration,
) -> Result<RegistrationDetail, DomainError> {
    let student = tables
        .students
        .get(&registration.student_id)
        .ok_or_else(|| missing("registration", "student", registration.student_id))?;
    let course = tables
        .courses
        .get(&registration.course_id)
        .ok_or_else(|| missing("registration", "course", registration.course_id))?;
    Ok(RegistrationDetail {
        registration: registration.clone(),
        student: student.clone(),
        course: course.clone(),
    })
}

macro_rules! in_memory_detail {
    ($entity:ty, $field:ident, $tables_touched:expr, $assemble:ident) => {
        #[async_trait]
        impl DetailRepository<$entity> for InMemoryDetailRepository {
            async fn get_all_detail(
                &self,
                _track: bool,
            ) -> Result<Vec<<$entity as crate::domain::entities::WithDetail>::Detail>, DomainError>
            {
                let tables = self.read($tables_touched);
                tables
                    .$field
                    .values()
                    .map(|row| $assemble(&tables, row))
                    .collect()
            }

            async fn get_by_id_detail(
                &self,
                id: <$entity as Aggregate>::Id,
                _track: bool,
            ) -> Result<Option<<$entity as crate::domain::entities::WithDetail>::Detail>, DomainError>
            {
                let tables = self.read($tables_touched);
                tables
                    .$field
                    .get(&id)
                    .map(|row| $assemble(&tables, row))
                    .transpose()
            }
        }
    };
}

in_memory_detail!(Course, courses, 2, course_detail);
in_memory_detail!(Lesson, lessons, 2, lesson_detail);
in_memory_detail!(ExamResult, exam_results, 3, exam_result_detail);
in_memory_detail!(Registration, registrations, 3, registration_detail);

// ============================================================================
// Unit of Work
// ============================================================================

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    changes: Arc<ChangeTracker>,
    /// Table contents when the explicit transaction opened
    transaction: Mutex<Option<Tables>>,
    students: InMemoryRepository<Student>,
    instructors: InMemoryRepository<Instructor>,
    courses: InMemoryRepository<Course>,
    lessons: InMemoryRepository<Lesson>,
    exams: InMemoryRepository<Exam>,
    exam_results: InMemoryRepository<ExamResult>,
    registrations: InMemoryRepository<Registration>,
    details: InMemoryDetailRepository,
}

impl InMemoryUnitOfWork {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        let changes = Arc::new(ChangeTracker::new());
        Self {
            students: InMemoryRepository::new(store.clone(), changes.clone()),
            instructors: InMemoryRepository::new(store.clone(), changes.clone()),
            courses: InMemoryRepository::new(store.clone(), changes.clone()),
            lessons: InMemoryRepository::new(store.clone(), changes.clone()),
            exams: InMemoryRepository::new(store.clone(), changes.clone()),
            exam_results: InMemoryRepository::new(store.clone(), changes.clone()),
            registrations: InMemoryRepository::new(store.clone(), changes.clone()),
            details: InMemoryDetailRepository {
                store: store.clone(),
            },
            transaction: Mutex::new(None),
            changes,
            store,
        }
    }

    /// Roll back to the snapshot, if a transaction is open
    fn restore_snapshot(&self) -> bool {
        let snapshot = self.transaction.lock().unwrap().take();
        match snapshot {
            Some(tables) => {
                self.store.restore(tables);
                self.store.open_transactions.fetch_sub(1, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
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
        &self.details
    }

    fn lesson_details(&self) -> &dyn DetailRepository<Lesson> {
        &self.details
    }

    fn exam_result_details(&self) -> &dyn DetailRepository<ExamResult> {
        &self.details
    }

    fn registration_details(&self) -> &dyn DetailRepository<Registration> {
        &self.details
    }

    async fn commit(&self) -> Result<u64, DomainError> {
        let changes = self.changes.drain();
        if changes.is_empty() {
            return Ok(0);
        }
        self.store.commits.fetch_add(1, Ordering::SeqCst);
        let affected = self.store.flush(changes)?;

        if self.store.stall_commits.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(affected)
    }

    async fn open_transaction(&self) -> Result<(), DomainError> {
        let mut transaction = self.transaction.lock().unwrap();
        if transaction.is_some() {
            return Err(DomainError::Conflict(
                "a transaction is already open".to_string(),
            ));
        }
        *transaction = Some(self.store.snapshot());
        self.store.open_transactions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<(), DomainError> {
        match self.transaction.lock().unwrap().take() {
            Some(_) => {
                self.store.open_transactions.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(DomainError::Conflict("no open transaction".to_string())),
        }
    }

    async fn rollback_transaction(&self) -> Result<(), DomainError> {
        self.changes.clear();
        if self.restore_snapshot() {
            Ok(())
        } else {
            Err(DomainError::Conflict("no open transaction".to_string()))
        }
    }

    fn abandon_transaction(&self) {
        self.changes.clear();
        self.restore_snapshot();
    }
}

impl Drop for InMemoryUnitOfWork {
    fn drop(&mut self) {
        self.restore_snapshot();
    }
}

pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    type Unit = InMemoryUnitOfWork;

    fn create(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork::new(self.store.clone())
    }
}
