//! # Grocery List Item Repository
//!
//! Lines on grocery lists, each joined with a snapshot of its product.
//!
//! ## Read Mapping
//! ```text
//! grocery_list_items i LEFT JOIN products p ON p.id = i.product_id
//!
//!  i.id  i.grocery_list_id  i.product_id  i.amount │ p.name  p.price_cents
//!  ────  ─────────────────  ────────────  ──────── │ ──────  ─────────────
//!  1     1                  1             3        │ Melk    119    → product: Some(summary)
//!  9     3                  7             1        │ NULL    NULL   → product: None
//! ```
//!
//! Writes return the record re-read through the same join, so callers
//! always see the product name and price as stored right now.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use grocery_core::validation::validate_amount;
use grocery_core::{GroceryListItem, Money, NewGroceryListItem, ProductSummary};

/// A `grocery_list_items` row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct GroceryListItemRow {
    id: i64,
    grocery_list_id: i64,
    product_id: i64,
    amount: i64,
    joined_product_id: Option<i64>,
    product_name: Option<String>,
    product_price_cents: Option<i64>,
}

impl From<GroceryListItemRow> for GroceryListItem {
    fn from(row: GroceryListItemRow) -> Self {
        let product = match (row.joined_product_id, row.product_name, row.product_price_cents) {
            (Some(id), Some(name), Some(price_cents)) => Some(ProductSummary {
                id,
                name,
                price: Money::from_cents(price_cents),
            }),
            _ => None,
        };

        GroceryListItem {
            id: row.id,
            grocery_list_id: row.grocery_list_id,
            product_id: row.product_id,
            amount: row.amount,
            product,
        }
    }
}

const SELECT_ALL: &str = r#"
    SELECT i.id, i.grocery_list_id, i.product_id, i.amount,
           p.id AS joined_product_id,
           p.name AS product_name,
           p.price_cents AS product_price_cents
    FROM grocery_list_items i
    LEFT JOIN products p ON p.id = i.product_id
    ORDER BY i.id
"#;

const SELECT_BY_LIST: &str = r#"
    SELECT i.id, i.grocery_list_id, i.product_id, i.amount,
           p.id AS joined_product_id,
           p.name AS product_name,
           p.price_cents AS product_price_cents
    FROM grocery_list_items i
    LEFT JOIN products p ON p.id = i.product_id
    WHERE i.grocery_list_id = ?1
    ORDER BY i.id
"#;

const SELECT_BY_ID: &str = r#"
    SELECT i.id, i.grocery_list_id, i.product_id, i.amount,
           p.id AS joined_product_id,
           p.name AS product_name,
           p.price_cents AS product_price_cents
    FROM grocery_list_items i
    LEFT JOIN products p ON p.id = i.product_id
    WHERE i.id = ?1
"#;

/// Repository for grocery list items.
#[derive(Debug, Clone)]
pub struct GroceryListItemRepository {
    pool: SqlitePool,
}

impl GroceryListItemRepository {
    /// Creates a new GroceryListItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GroceryListItemRepository { pool }
    }

    /// All items of all lists, by id.
    pub async fn get_all(&self) -> DbResult<Vec<GroceryListItem>> {
        let rows: Vec<GroceryListItemRow> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed grocery list items");
        Ok(rows.into_iter().map(GroceryListItem::from).collect())
    }

    /// The items of one grocery list, by id.
    pub async fn get_all_on_grocery_list_id(
        &self,
        grocery_list_id: i64,
    ) -> DbResult<Vec<GroceryListItem>> {
        let rows: Vec<GroceryListItemRow> = sqlx::query_as(SELECT_BY_LIST)
            .bind(grocery_list_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(grocery_list_id, count = rows.len(), "Listed grocery list");
        Ok(rows.into_iter().map(GroceryListItem::from).collect())
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(GroceryListItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get(&self, id: i64) -> DbResult<Option<GroceryListItem>> {
        fetch_item(&self.pool, id).await
    }

    /// Adds an item and returns it as stored.
    ///
    /// ## Errors
    /// - `DbError::Validation` when the amount is below one
    /// - `DbError::ForeignKeyViolation` when the product does not exist
    pub async fn add(&self, item: &NewGroceryListItem) -> DbResult<GroceryListItem> {
        validate_amount(item.amount)?;

        debug!(
            grocery_list_id = item.grocery_list_id,
            product_id = item.product_id,
            amount = item.amount,
            "Adding grocery list item"
        );

        let result = sqlx::query(
            "INSERT INTO grocery_list_items (grocery_list_id, product_id, amount) VALUES (?1, ?2, ?3)",
        )
        .bind(item.grocery_list_id)
        .bind(item.product_id)
        .bind(item.amount)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        self.get(id).await?.ok_or_else(|| {
            DbError::Internal(format!("grocery list item {} vanished after insert", id))
        })
    }

    /// Overwrites list, product and amount of an existing item.
    ///
    /// ## Returns
    /// * `Ok(Some(GroceryListItem))` - The refreshed record
    /// * `Ok(None)` - No item with that id
    pub async fn update(&self, item: &GroceryListItem) -> DbResult<Option<GroceryListItem>> {
        validate_amount(item.amount)?;

        debug!(id = item.id, "Updating grocery list item");

        let result = sqlx::query(
            r#"
            UPDATE grocery_list_items SET
                grocery_list_id = ?2,
                product_id = ?3,
                amount = ?4
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(item.grocery_list_id)
        .bind(item.product_id)
        .bind(item.amount)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(item.id).await
    }

    /// Deletes an item.
    ///
    /// ## Returns
    /// * `Ok(Some(GroceryListItem))` - The item as it was before deletion
    /// * `Ok(None)` - No item with that id
    pub async fn delete(&self, id: i64) -> DbResult<Option<GroceryListItem>> {
        debug!(id, "Deleting grocery list item");

        let mut tx = self.pool.begin().await?;

        let Some(snapshot) = fetch_item(&mut *tx, id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM grocery_list_items WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((result.rows_affected() > 0).then_some(snapshot))
    }
}

async fn fetch_item<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> DbResult<Option<GroceryListItem>> {
    let row: Option<GroceryListItemRow> = sqlx::query_as(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(GroceryListItem::from))
}

// =============================================================================
// Unit Tests
// =============================================================================
