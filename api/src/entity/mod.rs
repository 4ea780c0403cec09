//! SeaORM table models
//!
//! One module per table. Domain aggregates are converted to and from these
//! in `adapters::postgres`.

pub mod courses;
pub mod exam_results;
pub mod exams;
pub mod instructors;
pub mod lessons;
pub mod registrations;
pub mod students;
