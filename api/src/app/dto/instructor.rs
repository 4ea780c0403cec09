//! Instructor DTOs

use serde::{Deserialize, Serialize};

use crate::app::manager::Managed;
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{Instructor, InstructorId};
use crate::domain::ports::{Repository, UnitOfWork};
use crate::domain::validation::{parse_id, require_text};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateInstructorDto {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateInstructorDto {
    pub id: String,
    pub name: String,
}

impl From<&Instructor> for InstructorDto {
    fn from(instructor: &Instructor) -> Self {
        Self {
            id: instructor.id.to_string(),
            name: instructor.name.clone(),
        }
    }
}

impl Validate for CreateInstructorDto {
    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }
}

impl Validate for UpdateInstructorDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<InstructorId>("id", &self.id)?;
        require_text("name", &self.name)
    }
}

impl IntoEntity<Instructor> for CreateInstructorDto {
    fn into_entity(self) -> Option<Instructor> {
        Some(Instructor {
            id: InstructorId::new(),
            name: self.name.trim().to_string(),
        })
    }
}

impl IntoEntity<Instructor> for UpdateInstructorDto {
    fn into_entity(self) -> Option<Instructor> {
        Some(Instructor {
            id: super::reference(&self.id)?,
            name: self.name.trim().to_string(),
        })
    }
}

impl Managed for Instructor {
    type Summary = InstructorDto;
    type ById = InstructorDto;
    type Create = CreateInstructorDto;
    type Update = UpdateInstructorDto;

    const MESSAGES: Messages = messages::INSTRUCTOR;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.instructors()
    }
}
