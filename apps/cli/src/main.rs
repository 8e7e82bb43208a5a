//! # grocery
//!
//! Command line front end for the grocery app.
//!
//! ## Usage
//! ```bash
//! # List the catalog
//! grocery products list
//!
//! # Add a product (admin only)
//! grocery products add --name Kaas --stock 5 --price 3.50 --role admin
//!
//! # Show grocery list 1 as JSON
//! grocery items list --list 1 --json
//! ```
//!
//! The database comes from the `GroceryAppDb` connection string in
//! `appsettings.toml`, or from `GROCERY_APP_DB`.

use clap::Parser;
use std::process::ExitCode;

use grocery_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    grocery_cli::init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match grocery_cli::run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(code = %err.code, "Command failed");
            if json {
                match serde_json::to_string(&err) {
                    Ok(encoded) => eprintln!("{}", encoded),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("{}", err);
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}
