//! # Grocery List Commands
//!
//! `grocery items ...`, served straight from the grocery list item
//! repository.

use clap::Subcommand;
use tracing::debug;

use crate::commands::Output;
use crate::error::CliError;
use crate::App;
use grocery_core::{GroceryListItem, NewGroceryListItem, DEFAULT_ITEM_AMOUNT};

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// List grocery list items
    List {
        /// Only the items of this grocery list
        #[arg(long = "list")]
        grocery_list_id: Option<i64>,
    },

    /// Add an item to a grocery list
    Add {
        /// Grocery list id
        #[arg(long = "list")]
        grocery_list_id: i64,

        /// Product id
        #[arg(long = "product")]
        product_id: i64,

        /// Number of pieces
        #[arg(long, default_value_t = DEFAULT_ITEM_AMOUNT)]
        amount: i64,
    },

    /// Overwrite list, product and amount of an item
    Update {
        /// Item id
        id: i64,

        /// Grocery list id
        #[arg(long = "list")]
        grocery_list_id: i64,

        /// Product id
        #[arg(long = "product")]
        product_id: i64,

        /// Number of pieces
        #[arg(long)]
        amount: i64,
    },

    /// Remove an item
    Delete {
        /// Item id
        id: i64,
    },
}

/// Runs a grocery list item command.
pub async fn execute(app: &App, command: ItemCommand) -> Result<Output, CliError> {
    let items = app.db().grocery_list_items();

    match command {
        ItemCommand::List { grocery_list_id } => {
            let listed = match grocery_list_id {
                Some(list_id) => items.get_all_on_grocery_list_id(list_id).await?,
                None => items.get_all().await?,
            };
            Ok(Output::Items(listed))
        }

        ItemCommand::Add {
            grocery_list_id,
            product_id,
            amount,
        } => {
            let input = NewGroceryListItem::new(grocery_list_id, product_id).amount(amount);
            Ok(Output::Item(items.add(&input).await?))
        }

        ItemCommand::Update {
            id,
            grocery_list_id,
            product_id,
            amount,
        } => {
            debug!(id, "items update");
            let item = GroceryListItem {
                id,
                grocery_list_id,
                product_id,
                amount,
                product: None,
            };

            items
                .update(&item)
                .await?
                .map(Output::Item)
                .ok_or_else(|| CliError::not_found("Grocery list item", id))
        }

        ItemCommand::Delete { id } => items
            .delete(id)
            .await?
            .map(Output::Item)
            .ok_or_else(|| CliError::not_found("Grocery list item", id)),
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

    async fn app() -> App {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        App::new(db, false)
    }

    #[tokio::test]
    async fn test_list_one_grocery_list() {
        let app = app().await;

        let output = execute(
            &app,
            ItemCommand::List {
                grocery_list_id: Some(1),
            },
        )
        .await
        .unwrap();

        let Output::Items(items) = output else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.product.is_some()));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let app = app().await;

        let err = execute(
            &app,
            ItemCommand::Add {
                grocery_list_id: 1,
                product_id: 99,
                amount: 1,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_huge_amount_still_lists() {
        let app = app().await;

        let added = execute(
            &app,
            ItemCommand::Add {
                grocery_list_id: 1,
                product_id: 3,
                amount: i64::MAX,
            },
        )
        .await
        .unwrap();
        assert!(added.render(false).is_ok());

        let listed = execute(
            &app,
            ItemCommand::List {
                grocery_list_id: Some(1),
            },
        )
        .await
        .unwrap();
        let text = listed.render(false).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains(&i64::MAX.to_string()));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let app = app().await;

        let err = execute(
            &app,
            ItemCommand::Update {
                id: 99,
                grocery_list_id: 1,
                product_id: 1,
                amount: 2,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = execute(&app, ItemCommand::Delete { id: 99 }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
