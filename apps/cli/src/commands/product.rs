//! # Product Commands
//!
//! `grocery products ...`, served by [`ProductService`](grocery_core::ProductService).
//!
//! ## Add Flow
//! ```text
//! grocery products add --name Kaas --stock 5 --price 3.50 --role admin
//!       │
//!       ▼
//! Principal::new("cli", [--role])
//!       │
//!       │ authorize_admin()
//!       ├── no admin role → CliError UNAUTHORIZED (service never called)
//!       ▼
//! ProductService::add(&grant, NewProduct)
//!       ├── invalid → CliError VALIDATION_ERROR
//!       ▼
//! Output::Product(created)
//! ```

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::debug;

use crate::commands::Output;
use crate::error::CliError;
use crate::App;
use grocery_core::validation::parse_shelf_life;
use grocery_core::{Money, NewProduct, Principal, Role};

/// Name of the principal commands run as.
const CLI_PRINCIPAL: &str = "cli";

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List all products
    List,

    /// Show one product
    Show {
        /// Product id
        id: i64,
    },

    /// Add a product (requires --role admin)
    Add {
        #[command(flatten)]
        fields: ProductFields,

        /// Role to act with
        #[arg(long)]
        role: Option<Role>,
    },

    /// Overwrite every field of a product
    Update {
        /// Product id
        id: i64,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product that no grocery list uses
    Delete {
        /// Product id
        id: i64,
    },
}

/// The editable fields of a product.
#[derive(Debug, Clone, Args)]
pub struct ProductFields {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Pieces in stock
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub stock: i64,

    /// Unit price, e.g. 3.50
    #[arg(long, allow_hyphen_values = true)]
    pub price: Money,

    /// Best-before date, YYYY-MM-DD
    #[arg(long, value_parser = parse_shelf_life)]
    pub shelf_life: Option<NaiveDate>,
}

impl From<ProductFields> for NewProduct {
    fn from(fields: ProductFields) -> Self {
        NewProduct {
            name: fields.name,
            stock: fields.stock,
            shelf_life: fields.shelf_life,
            price: fields.price,
        }
    }
}

/// Runs a product command.
pub async fn execute(app: &App, command: ProductCommand) -> Result<Output, CliError> {
    let service = app.products();

    match command {
        ProductCommand::List => Ok(Output::Products(service.get_all().await?)),

        ProductCommand::Show { id } => service
            .get(id)
            .await?
            .map(Output::Product)
            .ok_or_else(|| CliError::not_found("Product", id)),

        ProductCommand::Add { fields, role } => {
            let principal = Principal::new(CLI_PRINCIPAL, role);
            let grant = principal.authorize_admin()?;

            let created = service.add(&grant, fields.into()).await?;
            Ok(Output::Product(created))
        }

        ProductCommand::Update { id, fields } => {
            debug!(id, "products update");
            let product = NewProduct::from(fields).into_product(id);

            service
                .update(product)
                .await?
                .map(Output::Product)
                .ok_or_else(|| CliError::not_found("Product", id))
        }

        ProductCommand::Delete { id } => service
            .delete(id)
            .await?
            .map(Output::Product)
            .ok_or_else(|| CliError::not_found("Product", id)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use grocery_db::{Database, DbConfig};

    async fn app(memory_catalog: bool) -> App {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        App::new(db, memory_catalog)
    }

    fn kaas() -> ProductFields {
        ProductFields {
            name: "Kaas".to_string(),
            stock: 5,
            price: Money::from_cents(350),
            shelf_life: None,
        }
    }

    #[tokio::test]
    async fn test_add_without_admin_is_refused() {
        let app = app(false).await;

        let err = execute(&app, ProductCommand::Add { fields: kaas(), role: None })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = execute(
            &app,
            ProductCommand::Add {
                fields: kaas(),
                role: Some(Role::User),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let Output::Products(products) = execute(&app, ProductCommand::List).await.unwrap() else {
            panic!("expected a product list");
        };
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_add_as_admin() {
        let app = app(false).await;

        let output = execute(
            &app,
            ProductCommand::Add {
                fields: kaas(),
                role: Some(Role::Admin),
            },
        )
        .await
        .unwrap();

        let Output::Product(created) = output else {
            panic!("expected a product");
        };
        assert_eq!(created.id, 4);
        assert_eq!(created.name, "Kaas");
    }

    #[tokio::test]
    async fn test_memory_catalog() {
        let app = app(true).await;

        let Output::Product(product) = execute(&app, ProductCommand::Show { id: 4 }).await.unwrap()
        else {
            panic!("expected a product");
        };
        assert_eq!(product.name, "Cornflakes");
    }

    #[tokio::test]
    async fn test_missing_product() {
        let app = app(false).await;

        for command in [
            ProductCommand::Show { id: 99 },
            ProductCommand::Delete { id: 99 },
            ProductCommand::Update { id: 99, fields: kaas() },
        ] {
            let err = execute(&app, command).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::NotFound);
        }
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let app = app(false).await;
        let mut fields = kaas();
        fields.price = Money::from_cents(-1);

        let err = execute(&app, ProductCommand::Update { id: 1, fields })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("price"));
    }

    #[tokio::test]
    async fn test_delete_used_product() {
        let app = app(false).await;

        let err = execute(&app, ProductCommand::Delete { id: 1 }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInUse);
    }
}
