//! Exam result aggregate
//!
//! Records the grade a student obtained in an exam.

use serde::{Deserialize, Serialize};

use super::{Aggregate, Exam, ExamId, Student, StudentId, WithDetail};
use crate::domain::ports::{Record, RecordKey};
use crate::error::DomainError;

/// Highest grade an exam can award
pub const MAX_GRADE: i16 = 100;

aggregate_id!(
    /// Unique identifier for an exam result
    ExamResultId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: ExamResultId,
    pub grade: i16,
    pub student_id: StudentId,
    pub exam_id: ExamId,
}

/// An exam result with its student and exam loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamResultDetail {
    pub result: ExamResult,
    pub student: Student,
    pub exam: Exam,
}

impl Aggregate for ExamResult {
    type Id = ExamResultId;

    const NAME: &'static str = "ExamResult";

    fn id(&self) -> ExamResultId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !(0..=MAX_GRADE).contains(&self.grade) {
            return Err(DomainError::Validation(format!(
                "grade must be between 0 and {}",
                MAX_GRADE
            )));
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::ExamResult(self)
    }

    fn record_key(id: ExamResultId) -> RecordKey {
        RecordKey::ExamResult(id)
    }
}

impl WithDetail for ExamResult {
    type Detail = ExamResultDetail;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_grade(grade: i16) -> ExamResult {
        ExamResult {
            id: ExamResultId::new(),
            grade,
            student_id: StudentId::new(),
            exam_id: ExamId::new(),
        }
    }

    #[test]
    fn grade_bounds() {
        assert!(result_with_grade(0).validate().is_ok());
        assert!(result_with_grade(MAX_GRADE).validate().is_ok());
        assert!(result_with_grade(-1).validate().is_err());
        assert!(result_with_grade(MAX_GRADE + 1).validate().is_err());
    }
}
