//! Transport DTOs
//!
//! Identifiers travel as strings and are parsed during validation, so a
//! malformed id is a validation failure rather than a rejected request body.
//! Each aggregate's module also binds its DTOs to the generic manager.

pub mod course;
pub mod exam;
pub mod exam_result;
pub mod instructor;
pub mod lesson;
pub mod registration;
pub mod student;

// Read by the manager and router tests; handlers reach DTOs through `Managed`
#[allow(unused_imports)]
pub use course::{CourseDetailDto, CourseDto, CreateCourseDto, UpdateCourseDto};
#[allow(unused_imports)]
pub use exam::{CreateExamDto, ExamDto, UpdateExamDto};
#[allow(unused_imports)]
pub use exam_result::{CreateExamResultDto, ExamResultDetailDto, ExamResultDto, UpdateExamResultDto};
#[allow(unused_imports)]
pub use instructor::{CreateInstructorDto, InstructorDto, UpdateInstructorDto};
#[allow(unused_imports)]
pub use lesson::{CreateLessonDto, LessonDetailDto, LessonDto, UpdateLessonDto};
#[allow(unused_imports)]
pub use registration::{
    CreateRegistrationDto, RegistrationDetailDto, RegistrationDto, UpdateRegistrationDto,
};
#[allow(unused_imports)]
pub use student::{CreateStudentDto, StudentDto, StudentSummaryDto, UpdateStudentDto};

use serde::{Deserialize, Serialize};

use crate::app::mapper::{IntoKey, Validate};
use crate::domain::entities::Aggregate;
use crate::domain::validation::parse_id;
use crate::error::DomainError;

/// Removal request, shared by every aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDto {
    #[serde(default)]
    pub id: String,
}

impl DeleteDto {
    #[allow(dead_code)]
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

impl Validate for DeleteDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<uuid::Uuid>("id", &self.id).map(|_| ())
    }
}

impl<E: Aggregate> IntoKey<E> for DeleteDto {
    fn into_key(&self) -> Option<E::Id> {
        self.id.parse().ok()
    }
}

/// Parse a required reference that validation has already checked
fn reference<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Student, StudentId};

    #[test]
    fn delete_dto_requires_id() {
        assert!(DeleteDto::default().validate().is_err());
        assert!(DeleteDto::new("not-a-uuid").validate().is_err());
    }

    #[test]
    fn delete_dto_maps_to_key() {
        let id = StudentId::new();
        let dto = DeleteDto::new(id);
        assert!(dto.validate().is_ok());
        assert_eq!(IntoKey::<Student>::into_key(&dto), Some(id));
    }
}
