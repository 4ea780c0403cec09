//! PostgreSQL adapters
//!
//! Implementations of the repository and unit-of-work ports using SeaORM
//! and PostgreSQL.

pub mod course_repo;
pub mod exam_repo;
pub mod exam_result_repo;
pub mod instructor_repo;
pub mod lesson_repo;
pub mod registration_repo;
pub mod session;
pub mod student_repo;
pub mod unit_of_work;


pub use course_repo::PostgresCourseRepository;
pub use exam_repo::PostgresExamRepository;
pub use exam_result_repo::PostgresExamResultRepository;
pub use instructor_repo::PostgresInstructorRepository;
pub use lesson_repo::PostgresLessonRepository;
pub use registration_repo::PostgresRegistrationRepository;
pub use student_repo::PostgresStudentRepository;
pub use unit_of_work::{SeaOrmUnitOfWork, SeaOrmUnitOfWorkFactory};
