//! Application layer
//!
//! Managers orchestrate the unit of work on behalf of the HTTP layer and
//! report every result through the outcome types.

pub mod dto;
pub mod manager;
pub mod mapper;
pub mod messages;
pub mod outcome;

pub use manager::{Detailed, EntityManager, Managed};
pub use outcome::{DataOutcome, Outcome};

use crate::domain::entities::{
    Course, Exam, ExamResult, Instructor, Lesson, Registration, Student,
};

// Per-aggregate names; the router instantiates `EntityManager` generically
#[allow(dead_code)]
pub type StudentManager<F> = EntityManager<Student, F>;
#[allow(dead_code)]
pub type InstructorManager<F> = EntityManager<Instructor, F>;
#[allow(dead_code)]
pub type CourseManager<F> = EntityManager<Course, F>;
#[allow(dead_code)]
pub type LessonManager<F> = EntityManager<Lesson, F>;
#[allow(dead_code)]
pub type ExamManager<F> = EntityManager<Exam, F>;
#[allow(dead_code)]
pub type ExamResultManager<F> = EntityManager<ExamResult, F>;
#[allow(dead_code)]
pub type RegistrationManager<F> = EntityManager<Registration, F>;
