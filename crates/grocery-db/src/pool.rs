//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  AppSettings::load ── "GroceryAppDb" connection string                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_settings(&settings) ← Configure pool settings          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │  1. create pool                                                 │
//! │       │  2. run migrations (tables IF NOT EXISTS)                       │
//! │       │  3. seed when products is empty (one transaction)               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.products()  db.grocery_list_items()                                │
//! │  Each call borrows a connection for one unit of work and returns it.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for file databases:
//! - Readers don't block writers
//! - Writers don't block readers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{sqlite_url, AppSettings};
use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::grocery_list_item::GroceryListItemRepository;
use crate::repository::product::ProductRepository;
use crate::seed;
use grocery_core::CONNECTION_STRING_NAME;

const IN_MEMORY_URL: &str = "sqlite::memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/grocery.db")
///     .max_connections(5)
///     .seed_if_empty(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// sqlx SQLite URL.
    pub url: String,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes. `None` for in-memory databases, which vanish
    /// with their last connection.
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Whether to insert the seed rows into an empty database.
    /// Default: true
    pub seed_if_empty: bool,
}

impl DbConfig {
    /// Creates a configuration for the SQLite file at `path`.
    ///
    /// The file is created if it doesn't exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_url(format!("sqlite://{}?mode=rwc", path.as_ref().display()))
    }

    /// Creates a configuration from a connection string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::from_connection_string("Data Source=grocery.db")?;
    /// ```
    pub fn from_connection_string(connection_string: &str) -> DbResult<Self> {
        Ok(Self::with_url(sqlite_url(connection_string)?))
    }

    /// Creates a configuration from the `GroceryAppDb` connection string.
    ///
    /// ## Errors
    /// `DbError::MissingConnectionString` when the entry is not configured,
    /// `DbError::InvalidConnectionString` when it names no database file.
    pub fn from_settings(settings: &AppSettings) -> DbResult<Self> {
        let connection_string = settings.connection_string(CONNECTION_STRING_NAME)?;
        Self::from_connection_string(connection_string)
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated and already seeded
    /// ```
    pub fn in_memory() -> Self {
        Self::with_url(IN_MEMORY_URL.to_string())
    }

    fn with_url(url: String) -> Self {
        let mut config = DbConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
            seed_if_empty: true,
        };

        if config.is_in_memory() {
            // In-memory requires single connection
            config.max_connections = 1;
            config.connect_timeout = Duration::from_secs(5);
            config.idle_timeout = None;
        }

        config
    }

    /// Returns true when the database only lives in memory.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether to seed an empty database on connect.
    pub fn seed_if_empty(mut self, seed: bool) -> Self {
        self.seed_if_empty = seed;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: clones share the pool.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_settings(&settings)?).await?;
///
/// let items = db.grocery_list_items().get_all_on_grocery_list_id(1).await?;
/// let service = ProductService::new(Arc::new(db.products()));
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    /// 5. Seeds an empty `products` table (if enabled)
    ///
    /// Steps 4 and 5 are idempotent: constructing the handle twice over the
    /// same file leaves exactly one copy of the seed rows.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(url = %config.url, "Initializing database connection");

        let connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        if config.seed_if_empty {
            db.seed_if_empty().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Called by `new()` when `run_migrations` is set; safe to call again.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Inserts the seed rows if `products` is empty.
    ///
    /// Returns true when rows were written.
    pub async fn seed_if_empty(&self) -> DbResult<bool> {
        seed::seed_if_empty(&self.pool).await
    }

    /// Returns migration diagnostics.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the grocery list item repository.
    pub fn grocery_list_items(&self) -> GroceryListItemRepository {
        GroceryListItemRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert!(db.migration_status().await.unwrap().is_up_to_date());
    }

    #[tokio::test]
    async fn test_seeded_on_creation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grocery_list_items")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(products, 3);
        assert_eq!(items, 5);
        assert!(!db.seed_if_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_seed_can_be_disabled() {
        let config = DbConfig::in_memory().seed_if_empty(false);
        let db = Database::new(config).await.unwrap();

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(products, 0);
    }

    #[tokio::test]
    async fn test_reopen_does_not_duplicate_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grocery.db");

        let first = Database::new(DbConfig::new(&path)).await.unwrap();
        first.close().await;

        let second = Database::new(DbConfig::new(&path)).await.unwrap();
        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(second.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grocery_list_items")
            .fetch_one(second.pool())
            .await
            .unwrap();

        assert_eq!(products, 3);
        assert_eq!(items, 5);
        second.close().await;
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.url, "sqlite:///tmp/test.db?mode=rwc");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(config.seed_if_empty);
    }

    #[test]
    fn test_config_from_settings() {
        let missing = DbConfig::from_settings(&AppSettings::default()).unwrap_err();
        assert!(missing.is_configuration());

        let settings = AppSettings::default()
            .with_connection_string(CONNECTION_STRING_NAME, "Data Source=:memory:");
        let config = DbConfig::from_settings(&settings).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.idle_timeout, None);
    }
}
