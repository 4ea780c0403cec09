//! Student DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::manager::Managed;
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{Student, StudentId};
use crate::domain::ports::{Repository, UnitOfWork};
use crate::domain::validation::{parse_id, require_national_id, require_text};
use crate::error::DomainError;

/// Student as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummaryDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: String,
    pub name: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateStudentDto {
    pub name: String,
    pub national_id: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStudentDto {
    pub id: String,
    pub name: String,
    pub national_id: String,
    pub birth_date: Option<NaiveDate>,
}

impl From<&Student> for StudentSummaryDto {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name.clone(),
        }
    }
}

impl From<&Student> for StudentDto {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name.clone(),
            national_id: student.national_id.clone(),
            birth_date: student.birth_date,
        }
    }
}

fn check_fields(
    name: &str,
    national_id: &str,
    birth_date: Option<NaiveDate>,
) -> Result<(), DomainError> {
    require_text("name", name)?;
    require_national_id("national_id", national_id)?;
    if birth_date.is_none() {
        return Err(DomainError::Validation("birth_date is required".to_string()));
    }
    Ok(())
}

impl Validate for CreateStudentDto {
    fn validate(&self) -> Result<(), DomainError> {
        check_fields(&self.name, &self.national_id, self.birth_date)
    }
}

impl Validate for UpdateStudentDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<StudentId>("id", &self.id)?;
        check_fields(&self.name, &self.national_id, self.birth_date)
    }
}

impl IntoEntity<Student> for CreateStudentDto {
    fn into_entity(self) -> Option<Student> {
        Some(Student {
            id: StudentId::new(),
            name: self.name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            birth_date: self.birth_date?,
        })
    }
}

impl IntoEntity<Student> for UpdateStudentDto {
    fn into_entity(self) -> Option<Student> {
        Some(Student {
            id: super::reference(&self.id)?,
            name: self.name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            birth_date: self.birth_date?,
        })
    }
}

impl Managed for Student {
    type Summary = StudentSummaryDto;
    type ById = StudentDto;
    type Create = CreateStudentDto;
    type Update = UpdateStudentDto;

    const MESSAGES: Messages = messages::STUDENT;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.students()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateStudentDto {
        CreateStudentDto {
            name: "Ada Lovelace".to_string(),
            national_id: "12345678901".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2001, 12, 10),
        }
    }

    #[test]
    fn missing_birth_date_is_rejected() {
        let dto = CreateStudentDto {
            birth_date: None,
            ..create_dto()
        };
        let err = dto.validate().unwrap_err();
        assert!(err.to_string().contains("birth_date is required"));
    }

    #[test]
    fn national_id_must_be_numeric() {
        let dto = CreateStudentDto {
            national_id: "12-345".to_string(),
            ..create_dto()
        };
        assert!(matches!(dto.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn create_maps_with_fresh_id() {
        let first = create_dto().into_entity().unwrap();
        let second = create_dto().into_entity().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Ada Lovelace");
    }

    #[test]
    fn update_keeps_given_id() {
        let id = StudentId::new();
        let dto = UpdateStudentDto {
            id: id.to_string(),
            name: "Ada".to_string(),
            national_id: "12345678901".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2001, 12, 10),
        };
        assert!(dto.validate().is_ok());
        assert_eq!(dto.into_entity().unwrap().id, id);
    }
}
