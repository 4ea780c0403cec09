//! Entity manager
//!
//! One generic manager serves all seven aggregates. Every operation runs on
//! a fresh unit of work and ends in an `Outcome`; `DomainError` never leaves
//! this module.
//!
//! Writes follow the same path: validate the DTO, map it, check the mapped
//! aggregate, stage, commit, then interpret the affected-row count.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::dto::DeleteDto;
use crate::app::mapper::{IntoEntity, IntoKey, Validate};
use crate::app::messages::Messages;
use crate::app::outcome::{DataOutcome, Outcome};
use crate::domain::entities::{Aggregate, WithDetail};
use crate::domain::ports::{
    DetailRepository, Repository, TransactionHandle, UnitOfWork, UnitOfWorkFactory,
};
use crate::domain::validation::parse_id;
use crate::error::DomainError;

/// Binds an aggregate to its DTOs, messages and repository
pub trait Managed: Aggregate {
    /// Shape returned by list reads
    type Summary: Serialize + Send + for<'a> From<&'a Self>;
    /// Shape returned by reads by id
    type ById: Serialize + Send + for<'a> From<&'a Self>;
    type Create: Validate + IntoEntity<Self> + DeserializeOwned + Send;
    type Update: Validate + IntoEntity<Self> + DeserializeOwned + Send;

    const MESSAGES: Messages;

    /// Whether a create is wrapped in an explicit transaction
    const CREATE_IN_TRANSACTION: bool = false;

    fn repository(unit: &dyn UnitOfWork) -> &dyn Repository<Self>;
}

/// Binds an aggregate's detail read to its DTO
pub trait Detailed: Managed + WithDetail {
    type DetailDto: Serialize + Send + for<'a> From<&'a Self::Detail>;

    fn detail_repository(unit: &dyn UnitOfWork) -> &dyn DetailRepository<Self>;
}

/// Orchestrates reads and writes for one aggregate
pub struct EntityManager<E, F> {
    units: Arc<F>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, F> EntityManager<E, F>
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    pub fn new(units: Arc<F>) -> Self {
        Self {
            units,
            _entity: PhantomData,
        }
    }

    /// List every row.
    ///
    /// An empty table is reported as a failure with the list-empty message.
    pub async fn get_all(&self, track: bool) -> DataOutcome<Vec<E::Summary>> {
        let messages = E::MESSAGES;
        match self.try_get_all(track).await {
            Ok(rows) if rows.is_empty() => DataOutcome::failure(messages.list_empty),
            Ok(rows) => DataOutcome::success(
                rows.iter().map(E::Summary::from).collect(),
                messages.list_success,
            ),
            Err(e) => DataOutcome::failure(report::<E>("get_all", messages.list_empty, &e)),
        }
    }

    /// Read one row. A blank or malformed id fails before any query.
    pub async fn get_by_id(&self, id: &str, track: bool) -> DataOutcome<E::ById> {
        let messages = E::MESSAGES;
        match self.try_get_by_id(id, track).await {
            Ok(entity) => DataOutcome::success(E::ById::from(&entity), messages.found),
            Err(e) => DataOutcome::failure(report::<E>("get_by_id", messages.not_found, &e)),
        }
    }

    pub async fn create(&self, dto: E::Create) -> Outcome {
        let messages = E::MESSAGES;
        match self.try_create(dto).await {
            Ok(id) => {
                tracing::info!(entity = E::NAME, id = %id, "Created");
                Outcome::success(messages.create_success)
            }
            Err(e) => Outcome::failure(report::<E>("create", messages.create_failed, &e)),
        }
    }

    pub async fn update(&self, dto: E::Update) -> Outcome {
        let messages = E::MESSAGES;
        match self.try_update(dto).await {
            Ok(id) => {
                tracing::info!(entity = E::NAME, id = %id, "Updated");
                Outcome::success(messages.update_success)
            }
            Err(e) => Outcome::failure(report::<E>("update", messages.update_failed, &e)),
        }
    }

    pub async fn remove(&self, dto: DeleteDto) -> Outcome {
        let messages = E::MESSAGES;
        match self.try_remove(dto).await {
            Ok(id) => {
                tracing::info!(entity = E::NAME, id = %id, "Removed");
                Outcome::success(messages.delete_success)
            }
            Err(e) => Outcome::failure(report::<E>("remove", messages.delete_failed, &e)),
        }
    }

    async fn try_get_all(&self, track: bool) -> Result<Vec<E>, DomainError> {
        let unit = self.units.create();
        E::repository(&unit).get_all(track).await
    }

    async fn try_get_by_id(&self, raw: &str, track: bool) -> Result<E, DomainError> {
        let id: E::Id = parse_id("id", raw)?;
        let unit = self.units.create();
        E::repository(&unit)
            .get_by_id(id, track)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    async fn try_create(&self, dto: E::Create) -> Result<E::Id, DomainError> {
        let entity = map::<E, _>(dto)?;
        let id = entity.id();
        let unit = self.units.create();

        if E::CREATE_IN_TRANSACTION {
            commit_atomically(&unit, move |unit| E::repository(unit).create(entity)).await?;
        } else {
            E::repository(&unit).create(entity);
            if unit.commit().await? == 0 {
                return Err(DomainError::NothingChanged);
            }
        }
        Ok(id)
    }

    async fn try_update(&self, dto: E::Update) -> Result<E::Id, DomainError> {
        let entity = map::<E, _>(dto)?;
        let id = entity.id();
        let unit = self.units.create();
        commit_atomically(&unit, move |unit| E::repository(unit).update(entity)).await?;
        Ok(id)
    }

    async fn try_remove(&self, dto: DeleteDto) -> Result<E::Id, DomainError> {
        dto.validate()?;
        let id = IntoKey::<E>::into_key(&dto).ok_or_else(|| {
            DomainError::Mapping(format!("'{}' does not identify a {}", dto.id, E::NAME))
        })?;
        let unit = self.units.create();
        commit_atomically(&unit, move |unit| E::repository(unit).remove(id)).await?;
        Ok(id)
    }
}

impl<E, F> EntityManager<E, F>
where
    E: Detailed,
    F: UnitOfWorkFactory,
{
    /// List every row with its references resolved
    pub async fn get_all_detail(&self, track: bool) -> DataOutcome<Vec<E::DetailDto>> {
        let messages = E::MESSAGES;
        let unit = self.units.create();
        match E::detail_repository(&unit).get_all_detail(track).await {
            Ok(rows) if rows.is_empty() => DataOutcome::failure(messages.list_empty),
            Ok(rows) => DataOutcome::success(
                rows.iter().map(E::DetailDto::from).collect(),
                messages.list_success,
            ),
            Err(e) => {
                DataOutcome::failure(report::<E>("get_all_detail", messages.list_empty, &e))
            }
        }
    }

    pub async fn get_by_id_detail(&self, id: &str, track: bool) -> DataOutcome<E::DetailDto> {
        let messages = E::MESSAGES;
        match self.try_get_by_id_detail(id, track).await {
            Ok(detail) => DataOutcome::success(E::DetailDto::from(&detail), messages.found),
            Err(e) => {
                DataOutcome::failure(report::<E>("get_by_id_detail", messages.not_found, &e))
            }
        }
    }

    async fn try_get_by_id_detail(&self, raw: &str, track: bool) -> Result<E::Detail, DomainError> {
        let id: E::Id = parse_id("id", raw)?;
        let unit = self.units.create();
        E::detail_repository(&unit)
            .get_by_id_detail(id, track)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }
}

/// Validate a DTO, project it, then check the projected aggregate
fn map<E, D>(dto: D) -> Result<E, DomainError>
where
    E: Aggregate,
    D: Validate + IntoEntity<E>,
{
    dto.validate()?;
    let entity = dto
        .into_entity()
        .ok_or_else(|| DomainError::Mapping(format!("request does not describe a {}", E::NAME)))?;
    entity.validate()?;
    Ok(entity)
}

/// Stage and flush inside an explicit transaction.
///
/// Zero affected rows or a failed flush rolls back; any other exit path
/// rolls back when the handle drops.
async fn commit_atomically<S>(unit: &dyn UnitOfWork, stage: S) -> Result<(), DomainError>
where
    S: FnOnce(&dyn UnitOfWork) + Send,
{
    let tx = TransactionHandle::begin(unit).await?;
    stage(unit);

    match unit.commit().await {
        Ok(0) => {
            rollback(tx).await;
            Err(DomainError::NothingChanged)
        }
        Ok(_) => tx.commit().await,
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

async fn rollback(tx: TransactionHandle<'_>) {
    if let Err(e) = tx.rollback().await {
        tracing::error!(error = %e, "Rollback failed");
    }
}

fn not_found<E: Aggregate>(id: E::Id) -> DomainError {
    DomainError::NotFound(format!("no {} with id {}", E::NAME, id))
}

/// Log a failed operation and build the caller-facing message
fn report<E: Aggregate>(operation: &'static str, base: &str, error: &DomainError) -> String {
    match error {
        DomainError::Validation(_) | DomainError::NotFound(_) => {
            tracing::debug!(entity = E::NAME, operation, error = %error, "Request rejected")
        }
        DomainError::Mapping(_) => {
            tracing::warn!(entity = E::NAME, operation, error = %error, "DTO could not be mapped")
        }
        DomainError::NothingChanged => {
            tracing::warn!(entity = E::NAME, operation, "Write affected no rows")
        }
        DomainError::Conflict(_) | DomainError::Database(_) => {
            tracing::error!(entity = E::NAME, operation, error = %error, "Persistence failed")
        }
    }

    match error.public_reason() {
        Some(reason) => format!("{}: {}", base, reason),
        None => base.to_string(),
    }
}
