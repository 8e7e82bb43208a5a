//! # grocery-db: Database Layer for the Grocery App
//!
//! This crate provides database access for the grocery app.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocery App Data Flow                            │
//! │                                                                         │
//! │  ProductService / CLI                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     grocery-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo    │    │ 001_initial_ │  │   │
//! │  │   │ SqlitePool    │◄───│ GroceryList-   │    │  schema.sql  │  │   │
//! │  │   │ + seed.rs     │    │  ItemRepo      │    │              │  │   │
//! │  │   └───────┬───────┘    └────────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   AppSettings (config.rs) ── GroceryAppDb connection string    │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   products, grocery_list_items                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Settings file and connection strings
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`seed`] - First-run seed rows
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grocery_db::{AppSettings, Database, DbConfig};
//!
//! let settings = AppSettings::load(None)?;
//! let db = Database::new(DbConfig::from_settings(&settings)?).await?;
//!
//! let first_list = db.grocery_list_items().get_all_on_grocery_list_id(1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppSettings;
pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::grocery_list_item::GroceryListItemRepository;
pub use repository::product::ProductRepository;
