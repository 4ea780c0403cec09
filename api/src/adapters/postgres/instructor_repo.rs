//! PostgreSQL adapter for the instructor repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder, Set};

use super::session::{on_session, Persisted, Session};
use crate::domain::entities::{Aggregate, Instructor, InstructorId};
use crate::domain::ports::{PendingChange, Repository};
use crate::entity::instructors;
use crate::error::DomainError;

pub struct PostgresInstructorRepository {
    session: Arc<Session>,
}

impl PostgresInstructorRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<Instructor> for PostgresInstructorRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Instructor>, DomainError> {
        let results = on_session!(self.session, db => {
            instructors::Entity::find()
                .order_by_asc(instructors::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: InstructorId, _track: bool) -> Result<Option<Instructor>, DomainError> {
        let result = on_session!(self.session, db => {
            instructors::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Instructor) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Instructor) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: InstructorId) {
        self.session.stage(PendingChange::Delete(Instructor::record_key(id)));
    }
}

impl Persisted for Instructor {
    type ActiveModel = instructors::ActiveModel;

    fn to_active_model(&self) -> instructors::ActiveModel {
        instructors::ActiveModel {
            id: Set(self.id.0),
            name: Set(self.name.clone()),
        }
    }
}

impl From<instructors::Model> for Instructor {
    fn from(model: instructors::Model) -> Self {
        Instructor {
            id: InstructorId(model.id),
            name: model.name,
        }
    }
}
