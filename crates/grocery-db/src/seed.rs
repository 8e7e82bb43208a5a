//! # Seed Data
//!
//! Fixed rows written once, when the `products` table is empty.
//!
//! ```text
//! products                      grocery_list_items
//! ┌────┬───────┬───────┬──────┐ ┌──────┬─────────┬────────┐
//! │ id │ name  │ stock │ price│ │ list │ product │ amount │
//! ├────┼───────┼───────┼──────┤ ├──────┼─────────┼────────┤
//! │ 1  │ Melk  │ 10    │ 1.19 │ │ 1    │ 1       │ 3      │
//! │ 2  │ Brood │ 15    │ 1.89 │ │ 1    │ 2       │ 1      │
//! │ 3  │ Boter │ 8     │ 2.49 │ │ 1    │ 3       │ 4      │
//! └────┴───────┴───────┴──────┘ │ 2    │ 1       │ 2      │
//!                               │ 2    │ 2       │ 5      │
//!                               └──────┴─────────┴────────┘
//! ```
//!
//! Everything is written in one transaction: either all rows land or none.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Seed products: (id, name, stock, price in cents).
pub const SEED_PRODUCTS: &[(i64, &str, i64, i64)] = &[
    (1, "Melk", 10, 119),
    (2, "Brood", 15, 189),
    (3, "Boter", 8, 249),
];

/// Seed grocery list items: (grocery list id, product id, amount).
pub const SEED_GROCERY_LIST_ITEMS: &[(i64, i64, i64)] =
    &[(1, 1, 3), (1, 2, 1), (1, 3, 4), (2, 1, 2), (2, 2, 5)];

/// Inserts the seed rows when `products` is empty.
///
/// ## Returns
/// * `Ok(true)` - Seed rows were written
/// * `Ok(false)` - Products already present, nothing written
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<bool> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        debug!(existing, "Products present, skipping seed");
        return Ok(false);
    }

    for &(id, name, stock, price_cents) in SEED_PRODUCTS {
        sqlx::query("INSERT INTO products (id, name, stock, price_cents) VALUES (?1, ?2, ?3, ?4)")
            .bind(id)
            .bind(name)
            .bind(stock)
            .bind(price_cents)
            .execute(&mut *tx)
            .await?;
    }

    for &(grocery_list_id, product_id, amount) in SEED_GROCERY_LIST_ITEMS {
        sqlx::query(
            "INSERT INTO grocery_list_items (grocery_list_id, product_id, amount) VALUES (?1, ?2, ?3)",
        )
        .bind(grocery_list_id)
        .bind(product_id)
        .bind(amount)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        products = SEED_PRODUCTS.len(),
        grocery_list_items = SEED_GROCERY_LIST_ITEMS.len(),
        "Seed data inserted"
    );
    Ok(true)
}
