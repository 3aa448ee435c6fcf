//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod schema_repo;
pub mod workshop_repo;

pub use schema_repo::SchemaRepo;
pub use workshop_repo::{DeleteOutcome, NoRelations, RelationGuard, WorkshopRepo};
