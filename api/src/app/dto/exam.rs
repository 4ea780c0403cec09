//! Exam DTOs

use serde::{Deserialize, Serialize};

use crate::app::manager::Managed;
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{Exam, ExamId};
use crate::domain::ports::{Repository, UnitOfWork};
use crate::domain::validation::{parse_id, require_text};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateExamDto {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateExamDto {
    pub id: String,
    pub name: String,
}

impl From<&Exam> for ExamDto {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id.to_string(),
            name: exam.name.clone(),
        }
    }
}

impl Validate for CreateExamDto {
    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }
}

impl Validate for UpdateExamDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<ExamId>("id", &self.id)?;
        require_text("name", &self.name)
    }
}

impl IntoEntity<Exam> for CreateExamDto {
    fn into_entity(self) -> Option<Exam> {
        Some(Exam {
            id: ExamId::new(),
            name: self.name.trim().to_string(),
        })
    }
}

impl IntoEntity<Exam> for UpdateExamDto {
    fn into_entity(self) -> Option<Exam> {
        Some(Exam {
            id: super::reference(&self.id)?,
            name: self.name.trim().to_string(),
        })
    }
}

impl Managed for Exam {
    type Summary = ExamDto;
    type ById = ExamDto;
    type Create = CreateExamDto;
    type Update = UpdateExamDto;

    const MESSAGES: Messages = messages::EXAM;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.exams()
    }
}
