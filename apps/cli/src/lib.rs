//! # Grocery CLI Library
//!
//! Wires settings, logging, the database and the product service together
//! behind the `grocery` command.
//!
//! ## Module Organization
//! ```text
//! grocery_cli/
//! ├── lib.rs              ◄─── You are here (Cli, App, run)
//! ├── commands/
//! │   ├── mod.rs          ◄─── Output and rendering
//! │   ├── product.rs      ◄─── grocery products ...
//! │   └── grocery_list.rs ◄─── grocery items ...
//! └── error.rs            ◄─── CliError (code + message)
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()       RUST_LOG, default info,grocery=debug,sqlx=warn │
//! │  2. AppSettings::load    --config, or <config dir>/appsettings.toml,    │
//! │                          then GROCERY_APP_DB                            │
//! │  3. DbConfig::from_settings   missing GroceryAppDb → CONFIGURATION_ERROR│
//! │  4. Database::new        migrations + seed on first run                 │
//! │  5. App::new             product store: SQLite, or the in-memory        │
//! │                          catalog with --memory-catalog                  │
//! │  6. run the subcommand, render, close the pool                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::grocery_list::ItemCommand;
use commands::product::ProductCommand;
use commands::Output;
use error::CliError;
use grocery_core::{InMemoryProductStore, ProductService, ProductStore};
use grocery_db::{AppSettings, Database, DbConfig};

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "grocery")]
#[command(author, version, about = "Grocery app catalog and grocery lists")]
pub struct Cli {
    /// Settings file (default: appsettings.toml in the config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Serve products from the built-in in-memory catalog
    #[arg(long, global = true)]
    pub memory_catalog: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductCommand,
    },
    /// Manage grocery list items
    Items {
        #[command(subcommand)]
        action: ItemCommand,
    },
}

// =============================================================================
// Application
// =============================================================================

/// Everything a command needs.
#[derive(Debug, Clone)]
pub struct App {
    db: Database,
    products: ProductService,
}

impl App {
    /// Builds the app over an open database.
    pub fn new(db: Database, memory_catalog: bool) -> Self {
        let store: Arc<dyn ProductStore> = if memory_catalog {
            debug!("Serving products from the in-memory catalog");
            Arc::new(InMemoryProductStore::with_catalog())
        } else {
            Arc::new(db.products())
        };

        App {
            db,
            products: ProductService::new(store),
        }
    }

    /// Loads settings and opens the configured database.
    pub async fn open(settings: &AppSettings, memory_catalog: bool) -> Result<Self, CliError> {
        let config = DbConfig::from_settings(settings)?;
        let db = Database::new(config).await?;
        Ok(App::new(db, memory_catalog))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }
}

/// Runs one command line and returns what to print.
pub async fn run(cli: Cli) -> Result<String, CliError> {
    let settings = AppSettings::load(cli.config.clone())?;
    let app = App::open(&settings, cli.memory_catalog).await?;

    let result = execute(&app, cli.command).await;
    app.db().close().await;

    result?.render(cli.json)
}

/// Dispatches a parsed command.
pub async fn execute(app: &App, command: Commands) -> Result<Output, CliError> {
    match command {
        Commands::Products { action } => commands::product::execute(app, action).await,
        Commands::Items { action } => commands::grocery_list::execute(app, action).await,
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=grocery=trace` - Show trace for grocery crates only
/// - Default: `info,grocery=debug,sqlx=warn`
///
/// Logs go to stderr so command output stays pipeable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grocery=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "grocery starting");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use grocery_core::{Money, Role};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "grocery", "products", "add", "--name", "Kaas", "--stock", "5", "--price", "3.50",
            "--shelf-life", "2025-09-30", "--role", "admin",
        ])
        .unwrap();

        let Commands::Products {
            action: ProductCommand::Add { fields, role },
        } = cli.command
        else {
            panic!("expected products add");
        };
        assert_eq!(fields.name, "Kaas");
        assert_eq!(fields.price, Money::from_cents(350));
        assert_eq!(fields.shelf_life.map(|d| d.to_string()).as_deref(), Some("2025-09-30"));
        assert_eq!(role, Some(Role::Admin));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from([
            "grocery", "products", "add", "--name", "Kaas", "--price", "3.505"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "grocery", "products", "add", "--name", "Kaas", "--price", "1", "--shelf-life", "30-09-2025"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "grocery", "products", "add", "--name", "Kaas", "--price", "1", "--role", "root"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "grocery", "items", "list", "--list", "2", "--json", "--memory-catalog",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(cli.memory_catalog);
        assert!(matches!(
            cli.command,
            Commands::Items {
                action: ItemCommand::List {
                    grocery_list_id: Some(2)
                }
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_connection_string_is_fatal() {
        let err = App::open(&AppSettings::default(), false).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigurationError);
    }

    #[tokio::test]
    async fn test_connection_string_without_data_source_is_fatal() {
        let settings = AppSettings::default()
            .with_connection_string(grocery_core::CONNECTION_STRING_NAME, "Cache=Shared");

        let err = App::open(&settings, false).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigurationError);
        assert_eq!(err.code.exit_code(), 78);
    }
}
