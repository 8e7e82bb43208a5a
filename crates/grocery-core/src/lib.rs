//! # grocery-core: Pure Business Logic for the Grocery App
//!
//! This crate is the **heart** of the grocery app. It holds the domain
//! types, the validation rules and the product store contract, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocery App Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (views, `grocery` CLI)                │   │
//! │  │      Product list ──► New product ──► Grocery list items        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductService                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ grocery-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   store   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Product-  │  │   rules   │  │   │
//! │  │   │ ListItem  │  │           │  │   Store   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │   auth    │  │  service  │                                 │   │
//! │  │   │ AdminGrant│  │ Product-  │                                 │   │
//! │  │   │           │  │  Service  │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  grocery-db (Database Layer)                    │   │
//! │  │        SQLite product store, grocery list items, seeding        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, GroceryListItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`auth`] - Roles and the admin capability
//! - [`store`] - The product store contract and its in-memory variant
//! - [`service`] - The product service
//!
//! ## Example Usage
//!
//! ```rust
//! use grocery_core::money::Money;
//!
//! let price: Money = "3.50".parse().unwrap();
//! assert_eq!(price.cents(), 350);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod money;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AdminGrant, Principal, Role};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use service::ProductService;
pub use store::{InMemoryProductStore, ProductStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Amount used for a grocery list item when none is given.
pub const DEFAULT_ITEM_AMOUNT: i64 = 1;

/// Name of the connection string the relational store is configured with.
pub const CONNECTION_STRING_NAME: &str = "GroceryAppDb";
