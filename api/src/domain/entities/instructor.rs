//! Instructor aggregate

use serde::{Deserialize, Serialize};

use super::Aggregate;
use crate::domain::ports::{Record, RecordKey};
use crate::domain::validation::require_text;
use crate::error::DomainError;

aggregate_id!(
    /// Unique identifier for an instructor
    InstructorId
);

/// An instructor who teaches courses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
}

impl Aggregate for Instructor {
    type Id = InstructorId;

    const NAME: &'static str = "Instructor";

    fn id(&self) -> InstructorId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }

    fn into_record(self) -> Record {
        Record::Instructor(self)
    }

    fn record_key(id: InstructorId) -> RecordKey {
        RecordKey::Instructor(id)
    }
}
