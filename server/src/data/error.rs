//! Unified error type for data layer
//!
//! Every store operation returns `StoreError`. Variants carry enough context
//! for the API layer to map them to status codes without re-inspecting the
//! underlying database error.

use thiserror::Error;

/// Unified error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input rejected before reaching the database
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness constraint violation
    #[error("Duplicate entry for {constraint}")]
    Duplicate { constraint: &'static str },

    /// A write referenced a row that does not exist
    #[error("Referenced {entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },

    /// The acting user may not perform this operation
    #[error("Permission denied")]
    PermissionDenied,

    /// The requested row does not exist
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// A user attempted to subscribe to themselves
    #[error("Users cannot subscribe to themselves")]
    SelfSubscription,

    /// Migration failed
    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not-found error for an entity keyed by id or token
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Classify a rejected write against the constraint it violated.
    ///
    /// Repositories perform plain INSERTs and let the store's constraints
    /// reject duplicates and dangling references, so this mapping is where
    /// unique and foreign-key violations become typed errors. `reference`
    /// names the row a foreign-key violation would point at, when the call
    /// site knows it (SQLite does not say which key failed).
    pub fn from_write(
        e: sqlx::Error,
        constraint: &'static str,
        reference: Option<(&'static str, i64)>,
    ) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return Self::Duplicate { constraint };
            }
            if db.is_foreign_key_violation()
                && let Some((entity, id)) = reference
            {
                return Self::MissingReference { entity, id };
            }
            if db.is_check_violation() {
                return Self::Validation(db.message().to_string());
            }
        }
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = StoreError::validation("ingredients list must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation failed: ingredients list must not be empty"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = StoreError::Duplicate {
            constraint: "tags.slug",
        };
        assert_eq!(err.to_string(), "Duplicate entry for tags.slug");
    }

    #[test]
    fn test_missing_reference_display() {
        let err = StoreError::MissingReference {
            entity: "ingredient",
            id: 42,
        };
        assert_eq!(err.to_string(), "Referenced ingredient 42 does not exist");
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("recipe", 7);
        assert_eq!(err.to_string(), "recipe 7 not found");

        let err = StoreError::not_found("short link", "deadbeef");
        assert_eq!(err.to_string(), "short link deadbeef not found");
    }

    #[test]
    fn test_migration_failed_display() {
        let err = StoreError::MigrationFailed {
            version: 2,
            name: "add_subscriptions".to_string(),
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_subscriptions) failed: syntax error"
        );
    }

    #[test]
    fn test_from_write_passes_through_non_constraint_errors() {
        let err = StoreError::from_write(sqlx::Error::RowNotFound, "tags.name", None);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
