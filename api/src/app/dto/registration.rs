//! Registration DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::manager::{Detailed, Managed};
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{
    CourseId, Registration, RegistrationDetail, RegistrationId, StudentId,
};
use crate::domain::ports::{DetailRepository, Repository, UnitOfWork};
use crate::domain::validation::parse_id;
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDto {
    pub id: String,
    pub price: Decimal,
    pub student_id: String,
    pub course_id: String,
}

/// Registration joined with its student and course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDetailDto {
    pub id: String,
    pub price: Decimal,
    pub student_id: String,
    pub student_name: String,
    pub course_id: String,
    pub course_name: String,
}

/// Price sign is an aggregate invariant, so it is checked after mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRegistrationDto {
    pub price: Option<Decimal>,
    pub student_id: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRegistrationDto {
    pub id: String,
    pub price: Option<Decimal>,
    pub student_id: String,
    pub course_id: String,
}

impl From<&Registration> for RegistrationDto {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id.to_string(),
            price: registration.price,
            student_id: registration.student_id.to_string(),
            course_id: registration.course_id.to_string(),
        }
    }
}

impl From<&RegistrationDetail> for RegistrationDetailDto {
    fn from(detail: &RegistrationDetail) -> Self {
        Self {
            id: detail.registration.id.to_string(),
            price: detail.registration.price,
            student_id: detail.student.id.to_string(),
            student_name: detail.student.name.clone(),
            course_id: detail.course.id.to_string(),
            course_name: detail.course.name.clone(),
        }
    }
}

fn check_fields(
    price: Option<Decimal>,
    student_id: &str,
    course_id: &str,
) -> Result<(), DomainError> {
    if price.is_none() {
        return Err(DomainError::Validation("price is required".to_string()));
    }
    parse_id::<StudentId>("student_id", student_id)?;
    parse_id::<CourseId>("course_id", course_id)?;
    Ok(())
}

impl Validate for CreateRegistrationDto {
    fn validate(&self) -> Result<(), DomainError> {
        check_fields(self.price, &self.student_id, &self.course_id)
    }
}

impl Validate for UpdateRegistrationDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<RegistrationId>("id", &self.id)?;
        check_fields(self.price, &self.student_id, &self.course_id)
    }
}

impl IntoEntity<Registration> for CreateRegistrationDto {
    fn into_entity(self) -> Option<Registration> {
        Some(Registration {
            id: RegistrationId::new(),
            price: self.price?,
            student_id: super::reference(&self.student_id)?,
            course_id: super::reference(&self.course_id)?,
        })
    }
}

impl IntoEntity<Registration> for UpdateRegistrationDto {
    fn into_entity(self) -> Option<Registration> {
        Some(Registration {
            id: super::reference(&self.id)?,
            price: self.price?,
            student_id: super::reference(&self.student_id)?,
            course_id: super::reference(&self.course_id)?,
        })
    }
}

impl Managed for Registration {
    type Summary = RegistrationDto;
    type ById = RegistrationDto;
    type Create = CreateRegistrationDto;
    type Update = UpdateRegistrationDto;

    const MESSAGES: Messages = messages::REGISTRATION;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.registrations()
    }
}

impl Detailed for Registration {
    type DetailDto = RegistrationDetailDto;

    fn detail_repository(unit: &dyn UnitOfWork) -> &dyn DetailRepository<Self> {
        unit.registration_details()
    }
}
