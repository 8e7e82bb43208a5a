//! # CLI Error Type
//!
//! What a failed command reports to the user.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  command handler                                                       │
//! │  Result<Output, CliError>                                              │
//! │         │                                                               │
//! │         ├── DbError   (startup, grocery list items) ──┐                │
//! │         ├── CoreError (ProductService)              ──┼──► CliError    │
//! │         └── lookup returned None ── not_found() ─────┘     code+message│
//! │                                                                         │
//! │  stderr:  [VALIDATION_ERROR] price must not be negative                │
//! │  --json:  {"code":"VALIDATION_ERROR","message":"...","field":"price"}  │
//! │                                                                         │
//! │  Storage details go to the log, not to the user.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use grocery_core::CoreError;
use grocery_db::DbError;

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("[{code}] {message}")]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Offending input field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Nothing with that id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Caller lacks the required role
    Unauthorized,

    /// Product still referenced by grocery list items
    ProductInUse,

    /// Missing connection string or unreadable settings
    ConfigurationError,

    /// Database operation failed
    DatabaseError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ConfigurationError => 78,
            ErrorCode::ValidationError => 65,
            ErrorCode::Unauthorized => 77,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ProductInUse => "PRODUCT_IN_USE",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: i64) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => CliError {
                code: ErrorCode::ValidationError,
                message: e.to_string(),
                field: Some(e.field().to_string()),
            },
            DbError::ProductInUse { .. } => CliError::new(ErrorCode::ProductInUse, err.to_string()),
            DbError::MissingConnectionString { .. }
            | DbError::InvalidSettings { .. }
            | DbError::InvalidConnectionString { .. } => {
                CliError::new(ErrorCode::ConfigurationError, err.to_string())
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                CliError::new(ErrorCode::ValidationError, "Invalid product reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                tracing::error!("Database error: {}", other);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CliError {
                code: ErrorCode::ValidationError,
                message: e.to_string(),
                field: Some(e.field().to_string()),
            },
            CoreError::Unauthorized { .. } => CliError::new(ErrorCode::Unauthorized, err.to_string()),
            CoreError::ProductInUse { .. } => CliError::new(ErrorCode::ProductInUse, err.to_string()),
            CoreError::Storage(source) => match source.downcast::<DbError>() {
                Ok(db_err) => CliError::from(*db_err),
                Err(other) => {
                    tracing::error!("Storage error: {}", other);
                    CliError::new(ErrorCode::DatabaseError, "Database operation failed")
                }
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::{Role, ValidationError};

    #[test]
    fn test_validation_keeps_field() {
        let err: CliError = CoreError::Validation(ValidationError::Negative {
            field: "price".to_string(),
        })
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("price"));
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] price must not be negative");
    }

    #[test]
    fn test_unauthorized() {
        let err: CliError = CoreError::Unauthorized {
            required: Role::Admin,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.code.exit_code(), 77);
    }

    #[test]
    fn test_storage_hides_details() {
        let core: CoreError = DbError::QueryFailed("no such column: secret".to_string()).into();
        let err: CliError = core.into();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_missing_connection_string_is_configuration() {
        let err: CliError = DbError::missing_connection_string("GroceryAppDb").into();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
        assert_eq!(err.code.exit_code(), 78);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(CliError::not_found("Product", 9)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 9");
        assert!(json.get("field").is_none());
    }
}
