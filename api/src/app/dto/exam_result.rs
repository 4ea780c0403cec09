//! Exam result DTOs

use serde::{Deserialize, Serialize};

use crate::app::manager::{Detailed, Managed};
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{ExamId, ExamResult, ExamResultDetail, ExamResultId, StudentId};
use crate::domain::ports::{DetailRepository, Repository, UnitOfWork};
use crate::domain::validation::parse_id;
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResultDto {
    pub id: String,
    pub grade: i16,
    pub student_id: String,
    pub exam_id: String,
}

/// Exam result joined with its student and exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResultDetailDto {
    pub id: String,
    pub grade: i16,
    pub student_id: String,
    pub student_name: String,
    pub exam_id: String,
    pub exam_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateExamResultDto {
    pub grade: Option<i16>,
    pub student_id: String,
    pub exam_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateExamResultDto {
    pub id: String,
    pub grade: Option<i16>,
    pub student_id: String,
    pub exam_id: String,
}

impl From<&ExamResult> for ExamResultDto {
    fn from(result: &ExamResult) -> Self {
        Self {
            id: result.id.to_string(),
            grade: result.grade,
            student_id: result.student_id.to_string(),
            exam_id: result.exam_id.to_string(),
        }
    }
}

impl From<&ExamResultDetail> for ExamResultDetailDto {
    fn from(detail: &ExamResultDetail) -> Self {
        Self {
            id: detail.result.id.to_string(),
            grade: detail.result.grade,
            student_id: detail.student.id.to_string(),
            student_name: detail.student.name.clone(),
            exam_id: detail.exam.id.to_string(),
            exam_name: detail.exam.name.clone(),
        }
    }
}

fn check_fields(grade: Option<i16>, student_id: &str, exam_id: &str) -> Result<(), DomainError> {
    if grade.is_none() {
        return Err(DomainError::Validation("grade is required".to_string()));
    }
    parse_id::<StudentId>("student_id", student_id)?;
    parse_id::<ExamId>("exam_id", exam_id)?;
    Ok(())
}

impl Validate for CreateExamResultDto {
    fn validate(&self) -> Result<(), DomainError> {
        check_fields(self.grade, &self.student_id, &self.exam_id)
    }
}

impl Validate for UpdateExamResultDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<ExamResultId>("id", &self.id)?;
        check_fields(self.grade, &self.student_id, &self.exam_id)
    }
}

impl IntoEntity<ExamResult> for CreateExamResultDto {
    fn into_entity(self) -> Option<ExamResult> {
        Some(ExamResult {
            id: ExamResultId::new(),
            grade: self.grade?,
            student_id: super::reference(&self.student_id)?,
            exam_id: super::reference(&self.exam_id)?,
        })
    }
}

impl IntoEntity<ExamResult> for UpdateExamResultDto {
    fn into_entity(self) -> Option<ExamResult> {
        Some(ExamResult {
            id: super::reference(&self.id)?,
            grade: self.grade?,
            student_id: super::reference(&self.student_id)?,
            exam_id: super::reference(&self.exam_id)?,
        })
    }
}

impl Managed for ExamResult {
    type Summary = ExamResultDto;
    type ById = ExamResultDto;
    type Create = CreateExamResultDto;
    type Update = UpdateExamResultDto;

    const MESSAGES: Messages = messages::EXAM_RESULT;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.exam_results()
    }
}

impl Detailed for ExamResult {
    type DetailDto = ExamResultDetailDto;

    fn detail_repository(unit: &dyn UnitOfWork) -> &dyn DetailRepository<Self> {
        unit.exam_result_details()
    }
}
