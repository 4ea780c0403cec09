//! Lesson DTOs

use serde::{Deserialize, Serialize};

use crate::app::manager::{Detailed, Managed};
use crate::app::mapper::{IntoEntity, Validate};
use crate::app::messages::{self, Messages};
use crate::domain::entities::{CourseId, Lesson, LessonDetail, LessonId};
use crate::domain::ports::{DetailRepository, Repository, UnitOfWork};
use crate::domain::validation::{parse_id, require_text};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDto {
    pub id: String,
    pub title: String,
    pub course_id: String,
}

/// Lesson joined with its course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDetailDto {
    pub id: String,
    pub title: String,
    pub course_id: String,
    pub course_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateLessonDto {
    pub title: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateLessonDto {
    pub id: String,
    pub title: String,
    pub course_id: String,
}

impl From<&Lesson> for LessonDto {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            title: lesson.title.clone(),
            course_id: lesson.course_id.to_string(),
        }
    }
}

impl From<&LessonDetail> for LessonDetailDto {
    fn from(detail: &LessonDetail) -> Self {
        Self {
            id: detail.lesson.id.to_string(),
            title: detail.lesson.title.clone(),
            course_id: detail.course.id.to_string(),
            course_name: detail.course.name.clone(),
        }
    }
}

impl Validate for CreateLessonDto {
    fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)?;
        parse_id::<CourseId>("course_id", &self.course_id).map(|_| ())
    }
}

impl Validate for UpdateLessonDto {
    fn validate(&self) -> Result<(), DomainError> {
        parse_id::<LessonId>("id", &self.id)?;
        require_text("title", &self.title)?;
        parse_id::<CourseId>("course_id", &self.course_id).map(|_| ())
    }
}

impl IntoEntity<Lesson> for CreateLessonDto {
    fn into_entity(self) -> Option<Lesson> {
        Some(Lesson {
            id: LessonId::new(),
            title: self.title.trim().to_string(),
            course_id: super::reference(&self.course_id)?,
        })
    }
}

impl IntoEntity<Lesson> for UpdateLessonDto {
    fn into_entity(self) -> Option<Lesson> {
        Some(Lesson {
            id: super::reference(&self.id)?,
            title: self.title.trim().to_string(),
            course_id: super::reference(&self.course_id)?,
        })
    }
}

impl Managed for Lesson {
    type Summary = LessonDto;
    type ById = LessonDto;
    type Create = CreateLessonDto;
    type Update = UpdateLessonDto;

    const MESSAGES: Messages = messages::LESSON;
    const CREATE_IN_TRANSACTION: bool = true;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self> {
        unit.lessons()
    }
}

impl Detailed for Lesson {
    type DetailDto = LessonDetailDto;

    fn detail_repository(unit: &dyn UnitOfWork) -> &dyn DetailRepository<Self> {
        unit.lesson_details()
    }
}
