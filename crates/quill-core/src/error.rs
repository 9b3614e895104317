//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

/// Maps storage failures that carry no row identity.
///
/// `NotFound` is resolved by the services themselves since only they know
/// which entity and id were requested.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::ForeignKey(msg) => DomainError::InvalidReference(msg),
            RepoError::NotFound => DomainError::Internal("Entity vanished mid-operation".into()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_maps_to_duplicate() {
        let err: DomainError = RepoError::Constraint("users_email_key".into()).into();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn test_foreign_key_maps_to_invalid_reference() {
        let err: DomainError = RepoError::ForeignKey("fk_posts_author_id".into()).into();
        assert!(matches!(err, DomainError::InvalidReference(_)));
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("User", 7);
        assert_eq!(err.to_string(), "User with id 7 not found");
    }
}
