//! Exam aggregate

use serde::{Deserialize, Serialize};

use super::Aggregate;
use crate::domain::ports::{Record, RecordKey};
use crate::domain::validation::require_text;
use crate::error::DomainError;

aggregate_id!(
    /// Unique identifier for an exam
    ExamId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: ExamId,
    pub name: String,
}

impl Aggregate for Exam {
    type Id = ExamId;

    const NAME: &'static str = "Exam";

    fn id(&self) -> ExamId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }

    fn into_record(self) -> Record {
        Record::Exam(self)
    }

    fn record_key(id: ExamId) -> RecordKey {
        RecordKey::Exam(id)
    }
}
