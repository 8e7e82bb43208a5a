//! # Authorization
//!
//! Roles and the capability that proves an admin check passed.
//!
//! ## Capability Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Principal { name, roles }                                             │
//! │       │                                                                 │
//! │       │  authorize_admin()                                              │
//! │       ▼                                                                 │
//! │  ┌───────────────┐    no admin role    ┌───────────────────────────┐   │
//! │  │  role check   │ ──────────────────► │ CoreError::Unauthorized   │   │
//! │  └───────┬───────┘                     └───────────────────────────┘   │
//! │          │ ok                                                           │
//! │          ▼                                                              │
//! │  AdminGrant ───► ProductService::add(&grant, product)                  │
//! │                                                                         │
//! │  AdminGrant has a private field: the only way to get one is the check. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};

/// A role a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May manage the product catalog.
    Admin,
    /// Regular shopper.
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}', expected admin or user", other),
            }),
        }
    }
}

/// The caller of a service operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Principal {
    name: String,
    roles: Vec<Role>,
}

impl Principal {
    /// Creates a principal with the given roles.
    pub fn new(name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Principal {
            name: name.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// A principal without any role.
    pub fn anonymous() -> Self {
        Principal::default()
    }

    /// Display name of the principal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when the principal holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Checks the admin role and hands out the matching capability.
    pub fn authorize_admin(&self) -> CoreResult<AdminGrant> {
        if !self.has_role(Role::Admin) {
            tracing::warn!(principal = %self.name, "admin role required");
            return Err(CoreError::Unauthorized {
                required: Role::Admin,
            });
        }

        Ok(AdminGrant {
            principal: self.name.clone(),
        })
    }
}

/// Proof that the holder passed the admin role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGrant {
    principal: String,
}

impl AdminGrant {
    /// Name of the principal the grant was issued to.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
