//! Lesson aggregate

use serde::{Deserialize, Serialize};

use super::{Aggregate, Course, CourseId, WithDetail};
use crate::domain::ports::{Record, RecordKey};
use crate::domain::validation::require_text;
use crate::error::DomainError;

aggregate_id!(
    /// Unique identifier for a lesson
    LessonId
);

/// A single lesson belonging to a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub course_id: CourseId,
}

/// A lesson with its course loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetail {
    pub lesson: Lesson,
    pub course: Course,
}

impl Aggregate for Lesson {
    type Id = LessonId;

    const NAME: &'static str = "Lesson";

    fn id(&self) -> LessonId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)
    }

    fn into_record(self) -> Record {
        Record::Lesson(self)
    }

    fn record_key(id: LessonId) -> RecordKey {
        RecordKey::Lesson(id)
    }
}

impl WithDetail for Lesson {
    type Detail = LessonDetail;
}
