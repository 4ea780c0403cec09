//! PostgreSQL adapter for the registration repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, LoaderTrait, QueryOrder, Set};

use super::session::{dangling, db_error, on_session, Persisted, Session};
use crate::domain::entities::{
    Aggregate, CourseId, Registration, RegistrationDetail, RegistrationId, StudentId,
};
use crate::domain::ports::{DetailRepository, PendingChange, Repository};
use crate::entity::{courses, registrations, students};
use crate::error::DomainError;

pub struct PostgresRegistrationRepository {
    session: Arc<Session>,
}

impl PostgresRegistrationRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

/// Resolve students and courses with one query per table
async fn with_references<C: ConnectionTrait>(
    db: &C,
    rows: Vec<registrations::Model>,
) -> Result<Vec<RegistrationDetail>, DomainError> {
    let students = rows.load_one(students::Entity, db).await.map_err(db_error)?;
    let courses = rows.load_one(courses::Entity, db).await.map_err(db_error)?;

    rows.into_iter()
        .zip(students.into_iter().zip(courses))
        .map(|(registration, (student, course))| {
            let student = student
                .ok_or_else(|| dangling("registration", "student", registration.student_id))?;
            let course = course
                .ok_or_else(|| dangling("registration", "course", registration.course_id))?;
            Ok(RegistrationDetail {
                registration: registration.into(),
                student: student.into(),
                course: course.into(),
            })
        })
        .collect()
}

#[async_trait]
impl Repository<Registration> for PostgresRegistrationRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Registration>, DomainError> {
        let results = on_session!(self.session, db => {
            registrations::Entity::find()
                .order_by_asc(registrations::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(
        &self,
        id: RegistrationId,
        _track: bool,
    ) -> Result<Option<Registration>, DomainError> {
        let result = on_session!(self.session, db => {
            registrations::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Registration) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Registration) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: RegistrationId) {
        self.session
            .stage(PendingChange::Delete(Registration::record_key(id)));
    }
}

#[async_trait]
impl DetailRepository<Registration> for PostgresRegistrationRepository {
    async fn get_all_detail(&self, _track: bool) -> Result<Vec<RegistrationDetail>, DomainError> {
        on_session!(self.session, db => {
            let rows = registrations::Entity::find()
                .order_by_asc(registrations::Column::Id)
                .all(db)
                .await
                .map_err(db_error)?;
            with_references(db, rows).await
        })
    }

    async fn get_by_id_detail(
        &self,
        id: RegistrationId,
        _track: bool,
    ) -> Result<Option<RegistrationDetail>, DomainError> {
        on_session!(self.session, db => {
            let row = registrations::Entity::find_by_id(id.0)
                .one(db)
                .await
                .map_err(db_error)?;
            match row {
                Some(row) => Ok(with_references(db, vec![row]).await?.pop()),
                None => Ok(None),
            }
        })
    }
}

impl Persisted for Registration {
    type ActiveModel = registrations::ActiveModel;

    fn to_active_model(&self) -> registrations::ActiveModel {
        registrations::ActiveModel {
            id: Set(self.id.0),
            price: Set(self.price),
            student_id: Set(self.student_id.0),
            course_id: Set(self.course_id.0),
        }
    }
}

impl From<registrations::Model> for Registration {
    fn from(model: registrations::Model) -> Self {
        Registration {
            id: RegistrationId(model.id),
            price: model.price,
            student_id: StudentId(model.student_id),
            course_id: CourseId(model.course_id),
        }
    }
}
