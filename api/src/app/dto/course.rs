//! Course DTOs

use serde::{Deserialize, Serialize};

use crate::app::manager::{Detailed, Managed};
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{Course, CourseDetail, CourseId, InstructorId};
use crate::domain::ports::{DetailRepository, Repository, UnitOfWork};
use crate::domain::validation::{parse_id, require_text};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDto {
    pub id: String,
    pub name: String,
    pub instructor_id: String,
}

/// Course joined with its instructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetailDto {
    pub id: String,
    pub name: String,
    pub instructor_id: String,
    pub instructor_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCourseDto {
    pub name: String,
    pub instructor_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateCourseDto {
    pub id: String,
    pub name: String,
    pub instructor_id: String,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            name: course.name.clone(),
            instructor_id: course.instructor_id.to_string(),
        }
    }
}

impl From<&CourseDetail> for CourseDetailDto {
    fn from(detail: &CourseDetail) -> Self {
        Self {
            id: detail.course.id.to_string(),
            name: detail.course.name.clone(),
            instructor_id: detail.instructor.id.to_string(),
            instructor_name: detail.instructor.name.clone(),
        }
    }
}

impl Validate for CreateCourseDto {
    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        parse_id::<InstructorId>("instructor_id", &self.instructor_id).map(|_| ())
    }
}

impl Validate for UpdateCourseDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<CourseId>("id", &self.id)?;
        require_text("name", &self.name)?;
        parse_id::<InstructorId>("instructor_id", &self.instructor_id).map(|_| ())
    }
}

impl IntoEntity<Course> for CreateCourseDto {
    fn into_entity(self) -> Option<Course> {
        Some(Course {
            id: CourseId::new(),
            name: self.name.trim().to_string(),
            instructor_id: super::reference(&self.instructor_id)?,
        })
    }
}

impl IntoEntity<Course> for UpdateCourseDto {
    fn into_entity(self) -> Option<Course> {
        Some(Course {
            id: super::reference(&self.id)?,
            name: self.name.trim().to_string(),
            instructor_id: super::reference(&self.instructor_id)?,
        })
    }
}

impl Managed for Course {
    type Summary = CourseDto;
    type ById = CourseDto;
    type Create = CreateCourseDto;
    type Update = UpdateCourseDto;

    const MESSAGES: Messages = messages::COURSE;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.courses()
    }
}

impl Detailed for Course {
    type DetailDto = CourseDetailDto;

    fn detail_repository(unit: &dyn UnitOfWork) -> &dyn DetailRepository<Self> {
        unit.course_details()
    }
}
