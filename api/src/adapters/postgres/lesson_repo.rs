//! PostgreSQL adapter for the lesson repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, LoaderTrait, QueryOrder, Set};

use super::session::{dangling, db_error, on_session, Persisted, Session};
use crate::domain::entities::{Aggregate, CourseId, Lesson, LessonDetail, LessonId};
use crate::domain::ports::{DetailRepository, PendingChange, Repository};
use crate::entity::{courses, lessons};
use crate::error::DomainError;

pub struct PostgresLessonRepository {
    session: Arc<Session>,
}

impl PostgresLessonRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

async fn with_courses<C: ConnectionTrait>(
    db: &C,
    rows: Vec<lessons::Model>,
) -> Result<Vec<LessonDetail>, DomainError> {
    let courses = rows.load_one(courses::Entity, db).await.map_err(db_error)?;

    rows.into_iter()
        .zip(courses)
        .map(|(lesson, course)| {
            let course = course.ok_or_else(|| dangling("lesson", "course", lesson.course_id))?;
            Ok(LessonDetail {
                lesson: lesson.into(),
                course: course.into(),
            })
        })
        .collect()
}

#[async_trait]
impl Repository<Lesson> for PostgresLessonRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Lesson>, DomainError> {
        let results = on_session!(self.session, db => {
            lessons::Entity::find()
                .order_by_asc(lessons::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: LessonId, _track: bool) -> Result<Option<Lesson>, DomainError> {
        let result = on_session!(self.session, db => {
            lessons::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Lesson) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Lesson) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: LessonId) {
        self.session.stage(PendingChange::Delete(Lesson::record_key(id)));
    }
}

#[async_trait]
impl DetailRepository<Lesson> for PostgresLessonRepository {
    async fn get_all_detail(&self, _track: bool) -> Result<Vec<LessonDetail>, DomainError> {
        on_session!(self.session, db => {
            let rows = lessons::Entity::find()
                .order_by_asc(lessons::Column::Id)
                .all(db)
                .await
                .map_err(db_error)?;
            with_courses(db, rows).await
        })
    }

    async fn get_by_id_detail(
        &self,
        id: LessonId,
        _track: bool,
    ) -> Result<Option<LessonDetail>, DomainError> {
        on_session!(self.session, db => {
            let row = lessons::Entity::find_by_id(id.0)
                .one(db)
                .await
                .map_err(db_error)?;
            match row {
                Some(row) => Ok(with_courses(db, vec![row]).await?.pop()),
                None => Ok(None),
            }
        })
    }
}

impl Persisted for Lesson {
    type ActiveModel = lessons::ActiveModel;

    fn to_active_model(&self) -> lessons::ActiveModel {
        lessons::ActiveModel {
            id: Set(self.id.0),
            title: Set(self.title.clone()),
            course_id: Set(self.course_id.0),
        }
    }
}

impl From<lessons::Model> for Lesson {
    fn from(model: lessons::Model) -> Self {
        Lesson {
            id: LessonId(model.id),
            title: model.title,
            course_id: CourseId(model.course_id),
        }
    }
}
