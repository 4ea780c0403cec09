//! PostgreSQL adapter for the exam repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder, Set};

use super::session::{on_session, Persisted, Session};
use crate::domain::entities::{Aggregate, Exam, ExamId};
use crate::domain::ports::{PendingChange, Repository};
use crate::entity::exams;
use crate::error::DomainError;

pub struct PostgresExamRepository {
    session: Arc<Session>,
}

impl PostgresExamRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<Exam> for PostgresExamRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<Exam>, DomainError> {
        let results = on_session!(self.session, db => {
            exams::Entity::find()
                .order_by_asc(exams::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: ExamId, _track: bool) -> Result<Option<Exam>, DomainError> {
        let result = on_session!(self.session, db => {
            exams::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: Exam) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: Exam) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: ExamId) {
        self.session.stage(PendingChange::Delete(Exam::record_key(id)));
    }
}

impl Persisted for Exam {
    type ActiveModel = exams::ActiveModel;

    fn to_active_model(&self) -> exams::ActiveModel {
        exams::ActiveModel {
            id: Set(self.id.0),
            name: Set(self.name.clone()),
        }
    }
}

impl From<exams::Model> for Exam {
    fn from(model: exams::Model) -> Self {
        Exam {
            id: ExamId(model.id),
            name: model.name,
        }
    }
}
