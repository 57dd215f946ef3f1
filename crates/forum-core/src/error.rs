//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("{0}")]
    Duplicate(String),
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "User",
            id,
        }
    }

    pub fn post_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }

    pub fn comment_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Comment",
            id,
        }
    }

    pub fn email_in_use() -> Self {
        Self::Duplicate("Email already in use".to_string())
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

    /// A unique index rejected the write (e.g. an email already in use).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
