//! # Error Types
//!
//! Domain-specific error types for grocery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocery-core errors (this file)                                       │
//! │  ├── CoreError        - What the service and stores return             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  grocery-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError;  CoreError → CliError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup that finds nothing is not an error anywhere in this crate:
//! stores return `Ok(None)`.

use thiserror::Error;

use crate::auth::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by product stores and the product service.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input was rejected before any mutation took place.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The caller does not hold the role the action requires.
    ///
    /// ## User Workflow
    /// ```text
    /// "New product" pressed
    ///      │
    ///      ▼
    /// Principal::authorize_admin()
    ///      │
    ///      ├── role present → AdminGrant → ProductService::add
    ///      │
    ///      └── role missing → Unauthorized (service never invoked)
    /// ```
    #[error("Role '{required}' is required for this action")]
    Unauthorized { required: Role },

    /// The product is still referenced by grocery list items.
    #[error("Product {id} is still used by {references} grocery list item(s)")]
    ProductInUse { id: i64, references: i64 },

    /// The backing storage failed (disk, corruption, pool).
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Wraps any storage-level error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CoreError::Storage(Box::new(err))
    }

    /// Returns true for errors raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The `Display` text is meant for logs. Front ends localize from
/// [`ValidationError::code`] and [`ValidationError::field`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable date or amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Stable, machine-readable code for localization.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "REQUIRED",
            ValidationError::Negative { .. } => "NEGATIVE",
            ValidationError::MustBePositive { .. } => "MUST_BE_POSITIVE",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::Negative { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_codes() {
        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.code(), "NEGATIVE");
        assert_eq!(err.field(), "price");

        let err = ValidationError::InvalidFormat {
            field: "shelf_life".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        };
        assert_eq!(err.code(), "INVALID_FORMAT");
        assert_eq!(err.field(), "shelf_life");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(core_err.is_validation());
    }

    #[test]
    fn test_unauthorized_message() {
        let err = CoreError::Unauthorized {
            required: Role::Admin,
        };
        assert_eq!(err.to_string(), "Role 'admin' is required for this action");
    }

    #[test]
    fn test_storage_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = CoreError::storage(io);
        assert!(!err.is_validation());
        assert!(std::error::Error::source(&err).is_some());
    }
}
