//! Student aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Aggregate;
use crate::domain::ports::{Record, RecordKey};
use crate::domain::validation::{require_national_id, require_text};
use crate::error::DomainError;

aggregate_id!(
    /// Unique identifier for a student
    StudentId
);

/// A student enrolled with the institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// National identity number, digits only
    pub national_id: String,
    pub birth_date: NaiveDate,
}

impl Aggregate for Student {
    type Id = StudentId;

    const NAME: &'static str = "Student";

    fn id(&self) -> StudentId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_national_id("national_id", &self.national_id)
    }

    fn into_record(self) -> Record {
        Record::Student(self)
    }

    fn record_key(id: StudentId) -> RecordKey {
        RecordKey::Student(id)
    }
}
