use crate::types::DbId;

/// Domain error shared by every layer above `core`.
///
/// The API crate maps each variant onto an HTTP status; repositories never
/// produce these directly.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
