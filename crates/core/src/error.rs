use crate::types::DbId;
use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more request fields failed validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldViolation>),

    /// The entity still has dependent records and cannot be removed.
    #[error("{entity} with id {id} has related records")]
    HasRelations { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
