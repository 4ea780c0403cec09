//! PostgreSQL adapter for the student repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder, Set};

use super::session::{on_session, Persisted, Session};
use crate::domain::entities::{Aggregate, Student, StudentId};
use crate::domain::ports::{PendingChange, Repository};
use crate::entity::students;
use crate::error::DomainError;

/// PostgreSQL implementation of `Repository<Student>`
pub struct PostgresStudentRepository {
    session: Arc<Session>,
}

impl PostgresStudentRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<Student> for PostgresStudentRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Student>, DomainError> {
        let results = on_session!(self.session, db => {
            students::Entity::find()
                .order_by_asc(students::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: StudentId, _track: bool) -> Result<Option<Student>, DomainError> {
        let result = on_session!(self.session, db => {
            students::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Student) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Student) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: StudentId) {
        self.session.stage(PendingChange::Delete(Student::record_key(id)));
    }
}

impl Persisted for Student {
    type ActiveModel = students::ActiveModel;

    fn to_active_model(&self) -> students::ActiveModel {
        students::ActiveModel {
            id: Set(self.id.0),
            name: Set(self.name.clone()),
            national_id: Set(self.national_id.clone()),
            birth_date: Set(self.birth_date),
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<students::Model> for Student {
    fn from(model: students::Model) -> Self {
        Student {
            id: StudentId(model.id),
            name: model.name,
            national_id: model.national_id,
            birth_date: model.birth_date,
        }
    }
}
