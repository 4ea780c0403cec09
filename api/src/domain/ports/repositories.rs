//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Reads go straight to storage. Writes are only staged here and become
//! visible when the owning unit of work commits.

use async_trait::async_trait;

use crate::domain::entities::{Aggregate, WithDetail};
use crate::error::DomainError;

/// Per-aggregate data access, one instance per aggregate type
#[async_trait]
pub trait Repository<E: Aggregate>: Send + Sync {
    /// Load every row.
    ///
    /// `track` is accepted for callers that distinguish attached and
    /// detached reads; returned values are always detached copies.
    async fn get_all(&self, track: bool) -> Result<Vec<E>, DomainError>;

    /// Load one row by identifier
    async fn get_by_id(&self, id: E::Id, track: bool) -> Result<Option<E>, DomainError>;

    /// Stage an insert
    fn create(&self, entity: E);

    /// Stage a full replacement by identifier
    fn update(&self, entity: E);

    /// Stage a removal by identifier
    fn remove(&self, id: E::Id);
}

/// Reads that resolve an aggregate's references in the same fetch.
///
/// Implementations must issue a fixed number of round trips whatever the
/// size of the result set.
#[async_trait]
pub trait DetailRepository<E: WithDetail>: Send + Sync {
    async fn get_all_detail(&self, track: bool) -> Result<Vec<E::Detail>, DomainError>;

    async fn get_by_id_detail(
        &self,
        id: E::Id,
        track: bool,
    ) -> Result<Option<E::Detail>, DomainError>;
}
