//! PostgreSQL adapter for the exam result repository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, LoaderTrait, QueryOrder, Set};

use super::session::{dangling, db_error, on_session, Persisted, Session};
use crate::domain::entities::{
    Aggregate, ExamId, ExamResult, ExamResultDetail, ExamResultId, StudentId,
};
use crate::domain::ports::{DetailRepository, PendingChange, Repository};
use crate::entity::{exam_results, exams, students};
use crate::error::DomainError;

pub struct PostgresExamResultRepository {
    session: Arc<Session>,
}

impl PostgresExamResultRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

/// Resolve students and exams with one query per table
async fn with_references<C: ConnectionTrait>(
    db: &C,
    rows: Vec<exam_results::Model>,
) -> Result<Vec<ExamResultDetail>, DomainError> {
    let students = rows.load_one(students::Entity, db).await.map_err(db_error)?;
    let exams = rows.load_one(exams::Entity, db).await.map_err(db_error)?;

    rows.into_iter()
        .zip(students.into_iter().zip(exams))
        .map(|(result, (student, exam))| {
            let student =
                student.ok_or_else(|| dangling("exam result", "student", result.student_id))?;
            let exam = exam.ok_or_else(|| dangling("exam result", "exam", result.exam_id))?;
            Ok(ExamResultDetail {
                result: result.into(),
                student: student.into(),
                exam: exam.into(),
            })
        })
        .collect()
}

#[async_trait]
impl Repository<ExamResult> for PostgresExamResultRepository {
    async fn get_all(&self, _track: bool) -> Result<Vec<ExamResult>, DomainError> {
        let results = on_session!(self.session, db => {
            exam_results::Entity::find()
                .order_by_asc(exam_results::Column::Id)
                .all(db)
                .await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(
        &self,
        id: ExamResultId,
        _track: bool,
    ) -> Result<Option<ExamResult>, DomainError> {
        let result = on_session!(self.session, db => {
            exam_results::Entity::find_by_id(id.0).one(db).await
        })
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    fn create(&self, entity: ExamResult) {
        self.session.stage(PendingChange::Insert(entity.into_record()));
    }

    fn update(&self, entity: ExamResult) {
        self.session.stage(PendingChange::Update(entity.into_record()));
    }

    fn remove(&self, id: ExamResultId) {
        self.session.stage(PendingChange::Delete(ExamResult::record_key(id)));
    }
}

#[async_trait]
impl DetailRepository<ExamResult> for PostgresExamResultRepository {
    async fn get_all_detail(&self, _track: bool) -> Result<Vec<ExamResultDetail>, DomainError> {
        on_session!(self.session, db => {
            let rows = exam_results::Entity::find()
                .order_by_asc(exam_results::Column::Id)
                .all(db)
                .await
                .map_err(db_error)?;
            with_references(db, rows).await
        })
    }

    async fn get_by_id_detail(
        &self,
        id: ExamResultId,
        _track: bool,
    ) -> Result<Option<ExamResultDetail>, DomainError> {
        on_session!(self.session, db => {
            let row = exam_results::Entity::find_by_id(id.0)
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

impl Persisted for ExamResult {
    type ActiveModel = exam_results::ActiveModel;

    fn to_active_model(&self) -> exam_results::ActiveModel {
        exam_results::ActiveModel {
            id: Set(self.id.0),
            grade: Set(self.grade),
            student_id: Set(self.student_id.0),
            exam_id: Set(self.exam_id.0),
        }
    }
}

impl From<exam_results::Model> for ExamResult {
    fn from(model: exam_results::Model) -> Self {
        ExamResult {
            id: ExamResultId(model.id),
            grade: model.grade,
            student_id: StudentId(model.student_id),
            exam_id: ExamId(model.exam_id),
        }
    }
}
