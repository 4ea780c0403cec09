//! PostgreSQL adapter for the course repository
//!
//! Detail reads load the courses and then all of their instructors with one
//! `IN` query, so the number of round trips does not depend on the number
//! of rows.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, LoaderTrait, QueryOrder, Set};

use super::session::{dangling, db_error, on_session, Persisted, Session};
use crate::domain::entities::{Aggregate, Course, CourseDetail, CourseId, InstructorId};
use crate::domain::ports::{DetailRepository, PendingChange, Repository};
use crate::entity::{courses, instructors};
use crate::error::DomainError;

pub struct PostgresCourseRepository {
    session: Arc<Session>,
}

impl PostgresCourseRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

async fn with_instructors<C: ConnectionTrait>(
    db: &C,
    rows: Vec<courses::Model>,
) -> Result<Vec<CourseDetail>, DomainError> {
    let instructors = rows
        .load_one(instructors::Entity, db)
        .await
        .map_err(db_error)?;

    rows.into_iter()
        .zip(instructors)
        .map(|(course, instructor)| {
            let instructor =
                instructor.ok_or_else(|| dangling("course", "instructor", course.instructor_id))?;
            Ok(CourseDetail {
                course: course.into(),
                instructor: instructor.into(),
            })
        })
        .collect()
}

#[async_trait]
impl Repository<Course> for PostgresCourseRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Course>, DomainError> {
        let results = on_session!(self.session, db => {
            courses::Entity::find()
                .order_by_asc(courses::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: CourseId, _track: bool) -> Result<Option<Course>, DomainError> {
        let result = on_session!(self.session, db => {
            courses::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Course) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Course) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: CourseId) {
        self.session.stage(PendingChange::Delete(Course::record_key(id)));
    }
}

#[async_trait]
impl DetailRepository<Course> for PostgresCourseRepository {
    async fn get_all_detail(&self, _track: bool) -> Result<Vec<CourseDetail>, DomainError> {
        on_session!(self.session, db => {
            let rows = courses::Entity::find()
                .order_by_asc(courses::Column::Id)
                .all(db)
                .await
                .map_err(db_error)?;
            with_instructors(db, rows).await
        })
    }

    async fn get_by_id_detail(
        &self,
        id: CourseId,
        _track: bool,
    ) -> Result<Option<CourseDetail>, DomainError> {
        on_session!(self.session, db => {
            let row = courses::Entity::find_by_id(id.0)
                .one(db)
                .await
                .map_err(db_error)?;
            match row {
                Some(row) => Ok(with_instructors(db, vec![row]).await?.pop()),
                None => Ok(None),
            }
        })
    }
}

impl Persisted for Course {
    type ActiveModel = courses::ActiveModel;

    fn to_active_model(&self) -> courses::ActiveModel {
        courses::ActiveModel {
            id: Set(self.id.0),
            name: Set(self.name.clone()),
            instructor_id: Set(self.instructor_id.0),
        }
    }
}

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Course {
            id: CourseId(model.id),
            name: model.name,
            instructor_id: InstructorId(model.instructor_id),
        }
    }
}

