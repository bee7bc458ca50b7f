//! Domain error type shared by every crate in the workspace.
//!
//! Variants describe *what* went wrong in domain terms; the api crate maps
//! them onto HTTP status codes.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by id does not exist, or is not visible to the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A row looked up by a natural key (e.g. a username) does not exist.
    #[error("Entity not found: {entity} '{name}'")]
    NotFoundByName { entity: &'static str, name: String },

    /// Input was well-formed but breaks a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is valid but clashes with the current state of a row,
    /// e.g. completing a quest twice.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        assert_eq!(
            CoreError::not_found("Quest", 12).to_string(),
            "Entity not found: Quest with id 12"
        );
    }
}
