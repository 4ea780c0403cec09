//! Course aggregate

use serde::{Deserialize, Serialize};

use super::{Aggregate, Instructor, InstructorId, WithDetail};
use crate::domain::ports::{Record, RecordKey};
use crate::domain::validation::require_text;
use crate::error::DomainError;

aggregate_id!(
    /// Unique identifier for a course
    CourseId
);

/// A course taught by one instructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub instructor_id: InstructorId,
}

/// A course with its instructor loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub course: Course,
    pub instructor: Instructor,
}

impl Aggregate for Course {
    type Id = CourseId;

    const NAME: &'static str = "Course";

    fn id(&self) -> CourseId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }

    fn into_record(self) -> Record {
        Record::Course(self)
    }

    fn record_key(id: CourseId) -> RecordKey {
        RecordKey::Course(id)
    }
}

impl WithDetail for Course {
    type Detail = CourseDetail;
}
