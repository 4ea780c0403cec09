//! Domain entities
//!
//! Pure domain models for the course-management aggregates.
//! These are separate from the SeaORM models in the `entity` module.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use crate::domain::ports::{Record, RecordKey};
use crate::error::DomainError;

/// Declares a UUID-backed identifier newtype for an aggregate.
macro_rules! aggregate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

pub mod course;
pub mod exam;
pub mod exam_result;
pub mod instructor;
pub mod lesson;
pub mod registration;
pub mod student;

pub use course::{Course, CourseDetail, CourseId};
pub use exam::{Exam, ExamId};
pub use exam_result::{ExamResult, ExamResultDetail, ExamResultId};
pub use instructor::{Instructor, InstructorId};
pub use lesson::{Lesson, LessonDetail, LessonId};
pub use registration::{Registration, RegistrationDetail, RegistrationId};
pub use student::{Student, StudentId};

/// Behaviour shared by every persisted aggregate.
///
/// An aggregate's identifier is assigned once, when the aggregate is first
/// mapped from a create request, and never changes afterwards.
pub trait Aggregate: Clone + Debug + PartialEq + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Hash + Debug + Display + FromStr + Send + Sync + 'static;

    /// Human-readable aggregate name, used in logs and messages
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Check the aggregate's invariants. Nothing failing this may be staged.
    fn validate(&self) -> Result<(), DomainError>;

    /// Wrap into the adapter-neutral record used for staged writes
    fn into_record(self) -> Record;

    /// Key used to stage a removal
    fn record_key(id: Self::Id) -> RecordKey;
}

/// An aggregate with a detail read that eager-loads its references.
pub trait WithDetail: Aggregate {
    type Detail: Clone + Debug + PartialEq + Send + Sync + 'static;
}
