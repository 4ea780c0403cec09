//! Seams between transport DTOs and aggregates
//!
//! DTO validation runs before mapping; the aggregate's own invariants are
//! checked again on the mapped value.

use crate::domain::entities::Aggregate;
use crate::error::DomainError;

/// Shape checks on an incoming DTO
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

/// Projection of a write DTO onto its aggregate.
///
/// Returns `None` when the DTO cannot describe an aggregate, which the
/// manager reports as a mapping failure.
pub trait IntoEntity<E> {
    fn into_entity(self) -> Option<E>;
}

/// Projection of a removal DTO onto the identifier it targets
pub trait IntoKey<E: Aggregate> {
    fn into_key(&self) -> Option<E::Id>;
}
