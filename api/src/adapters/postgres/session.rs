//! Database session shared by one unit of work and its repositories

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel,
};
use tokio::sync::Mutex;

use crate::domain::entities::Aggregate;
use crate::domain::ports::{ChangeTracker, PendingChange};
use crate::error::DomainError;

/// Run `$body` against the open transaction if there is one, otherwise
/// against the pooled connection. `$db` is bound to whichever is used.
macro_rules! on_session {
    ($session:expr, $db:ident => $body:expr) => {{
        let transaction = $session.transaction.lock().await;
        match transaction.as_ref() {
            Some($db) => $body,
            None => {
                let $db = &$session.connection;
                $body
            }
        }
    }};
}

pub(crate) use on_session;

pub struct Session {
    pub(super) connection: DatabaseConnection,
    pub(super) transaction: Mutex<Option<DatabaseTransaction>>,
    pub(super) changes: ChangeTracker,
}

impl Session {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            transaction: Mutex::new(None),
            changes: ChangeTracker::new(),
        }
    }

    pub fn stage(&self, change: PendingChange) {
        self.changes.stage(change);
    }
}

/// An aggregate with a SeaORM table behind it
pub trait Persisted: Aggregate {
    type ActiveModel: ActiveModelTrait + ActiveModelBehavior + Send;

    /// Every column set, ready for insert or full replacement
    fn to_active_model(&self) -> Self::ActiveModel;
}

pub(super) async fn insert_row<A, C>(db: &C, model: A) -> Result<u64, DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    <A::Entity as EntityTrait>::insert(model)
        .exec_without_returning(db)
        .await
}

pub(super) async fn update_row<A, C>(db: &C, model: A) -> Result<u64, DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    match <A::Entity as EntityTrait>::update(model).exec(db).await {
        Ok(_) => Ok(1),
        Err(DbErr::RecordNotUpdated) => Ok(0),
        Err(e) => Err(e),
    }
}

pub(super) fn db_error(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Error for a row whose foreign key resolved to nothing
pub(super) fn dangling(owner: &str, reference: &str, id: uuid::Uuid) -> DomainError {
    DomainError::Database(format!("{} references missing {} {}", owner, reference, id))
}
