//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      Settings (toml, env)                  │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► CoreError (ProductStore contract)                           │
//! │       │      Validation  → Validation                                  │
//! │       │      ProductInUse → ProductInUse                               │
//! │       │      anything else → Storage                                   │
//! │       ▼                                                                 │
//! │  CliError (in app) ← code + message for the user                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocery_core::{CoreError, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Input rejected before touching the database.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Deleting a product that grocery list items still point at.
    #[error("Product {id} is still used by {references} grocery list item(s)")]
    ProductInUse { id: i64, references: i64 },

    /// Unique constraint violation.
    #[error("Duplicate value for {field}")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Adding an item for a product id that does not exist
    /// - Deleting a product that is still referenced (backstop)
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The named connection string is not configured.
    #[error("Connection string '{name}' is not configured")]
    MissingConnectionString { name: String },

    /// The settings file exists but cannot be used.
    #[error("Invalid settings in {}: {reason}", path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    /// The connection string names no database file.
    #[error("Invalid connection string '{value}': {reason}")]
    InvalidConnectionString { value: String, reason: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Malformed connection string
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a MissingConnectionString error.
    pub fn missing_connection_string(name: impl Into<String>) -> Self {
        DbError::MissingConnectionString { name: name.into() }
    }

    /// Returns true for errors that mean the app cannot start.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DbError::MissingConnectionString { .. }
                | DbError::InvalidSettings { .. }
                | DbError::InvalidConnectionString { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
///
/// `RowNotFound` never reaches this point: lookups use `fetch_optional`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Lets repositories serve the `ProductStore` contract.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(v) => CoreError::Validation(v),
            DbError::ProductInUse { id, references } => CoreError::ProductInUse { id, references },
            other => CoreError::storage(other),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_stays_validation() {
        let err = DbError::Validation(ValidationError::Required {
            field: "name".to_string(),
        });
        let core: CoreError = err.into();
        assert!(core.is_validation());
    }

    #[test]
    fn test_product_in_use_maps_through() {
        let core: CoreError = DbError::ProductInUse { id: 1, references: 2 }.into();
        assert!(matches!(
            core,
            CoreError::ProductInUse { id: 1, references: 2 }
        ));
    }

    #[test]
    fn test_other_errors_become_storage() {
        let core: CoreError = DbError::PoolExhausted.into();
        assert!(matches!(core, CoreError::Storage(_)));
        assert_eq!(core.to_string(), "Storage error: Connection pool exhausted");
    }

    #[test]
    fn test_configuration_errors() {
        let err = DbError::missing_connection_string("GroceryAppDb");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Connection string 'GroceryAppDb' is not configured"
        );
        assert!(!DbError::PoolExhausted.is_configuration());
    }
}
