//! # Product Repository
//!
//! The SQLite variant of the product store.
//!
//! ## Key Operations
//! - CRUD over the `products` table
//! - Guarded delete: a product referenced by grocery list items stays
//!
//! ## Delete Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    SELECT product            ── none?  → ROLLBACK, Ok(None)            │
//! │    COUNT referencing items   ── > 0?   → ROLLBACK, ProductInUse        │
//! │    DELETE product                                                       │
//! │  COMMIT                                  → Ok(Some(snapshot))           │
//! │                                                                         │
//! │  The foreign key on grocery_list_items.product_id is the backstop.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use grocery_core::validation::validate_new_product;
use grocery_core::{CoreResult, Money, NewProduct, Product, ProductStore};

/// A `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    stock: i64,
    price_cents: i64,
    shelf_life: Option<NaiveDate>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            stock: row.stock,
            shelf_life: row.shelf_life,
            price: Money::from_cents(row.price_cents),
        }
    }
}

const SELECT_ALL: &str =
    "SELECT id, name, stock, price_cents, shelf_life FROM products ORDER BY id";
const SELECT_BY_ID: &str =
    "SELECT id, name, stock, price_cents, shelf_life FROM products WHERE id = ?1";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list_all().await?;
/// let melk = repo.get_by_id(1).await?;
///
/// // Or through the store contract
/// let service = ProductService::new(Arc::new(repo));
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products in id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        fetch_product(&self.pool, id).await
    }

    /// Inserts a new product; SQLite assigns the id.
    ///
    /// ## Errors
    /// `DbError::Validation` for a blank name or negative price. Nothing is
    /// written in that case.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let product = product.clone().trimmed();
        validate_new_product(&product)?;

        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, stock, price_cents, shelf_life) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.price.cents())
        .bind(product.shelf_life)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");

        Ok(product.into_product(id))
    }

    /// Overwrites name, stock, price and shelf life of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - The stored product after the update
    /// * `Ok(None)` - No product with that id
    pub async fn update(&self, product: &Product) -> DbResult<Option<Product>> {
        validate_new_product(&NewProduct {
            name: product.name.clone(),
            stock: product.stock,
            shelf_life: product.shelf_life,
            price: product.price,
        })?;

        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                stock = ?3,
                price_cents = ?4,
                shelf_life = ?5
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.price.cents())
        .bind(product.shelf_life)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = product.id, "Update matched no product");
            return Ok(None);
        }

        self.get_by_id(product.id).await
    }

    /// Deletes a product that no grocery list item references.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - The product as it was before deletion
    /// * `Ok(None)` - No product with that id
    ///
    /// ## Errors
    /// `DbError::ProductInUse` when list items still reference it.
    pub async fn delete(&self, id: i64) -> DbResult<Option<Product>> {
        debug!(id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        let Some(snapshot) = fetch_product(&mut *tx, id).await? else {
            return Ok(None);
        };

        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM grocery_list_items WHERE product_id = ?1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if references > 0 {
            debug!(id, references, "Product still referenced, not deleting");
            return Err(DbError::ProductInUse { id, references });
        }

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((result.rows_affected() > 0).then_some(snapshot))
    }

    /// Counts all products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn fetch_product<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> DbResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Product::from))
}

// =============================================================================
// ProductStore
// =============================================================================

#[async_trait]
impl ProductStore for ProductRepository {
    async fn get_all(&self) -> CoreResult<Vec<Product>> {
        Ok(self.list_all().await?)
    }

    async fn get(&self, id: i64) -> CoreResult<Option<Product>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn add(&self, product: NewProduct) -> CoreResult<Product> {
        Ok(self.insert(&product).await?)
    }

    async fn update(&self, product: Product) -> CoreResult<Option<Product>> {
        Ok(ProductRepository::update(self, &product).await?)
    }

    async fn delete(&self, id: i64) -> CoreResult<Option<Product>> {
        Ok(ProductRepository::delete(self, id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use grocery_core::CoreError;

    async fn seeded() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    async fn empty() -> ProductRepository {
        Database::new(DbConfig::in_memory().seed_if_empty(false))
            .await
            .unwrap()
            .products()
    }

    #[tokio::test]
    async fn test_list_seeded_products() {
        let repo = seeded().await;
        let products = repo.list_all().await.unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Melk", "Brood", "Boter"]);
        assert_eq!(products[0].price, Money::from_cents(119));
        assert_eq!(products[2].stock, 8);
        assert_eq!(products[1].shelf_life, None);
    }

    #[tokio::test]
    async fn test_insert_into_empty_table_starts_at_one() {
        let repo = empty().await;
        let created = repo
            .insert(&NewProduct::new("Kaas", 5, Money::from_cents(350)))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_insert_trims_name() {
        let repo = seeded().await;
        let created = repo
            .insert(&NewProduct::new("  Kaas ", 5, Money::from_cents(350)))
            .await
            .unwrap();

        assert_eq!(created.name, "Kaas");
        let read = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(read.name, "Kaas");
    }

    #[tokio::test]
    async fn test_shelf_life_round_trips() {
        let repo = seeded().await;
        let date = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();

        let created = repo
            .insert(&NewProduct::new("Kaas", 5, Money::from_cents(350)).shelf_life(date))
            .await
            .unwrap();

        let read = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(read.shelf_life, Some(date));
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_invalid_insert_writes_nothing() {
        let repo = seeded().await;

        let err = repo
            .insert(&NewProduct::new(" ", 1, Money::from_cents(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo
            .insert(&NewProduct::new("Kaas", 1, Money::from_cents(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = seeded().await;
        let ghost = NewProduct::new("Kaas", 1, Money::from_cents(100)).into_product(99);

        assert_eq!(repo.update(&ghost).await.unwrap(), None);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_referenced_product_is_refused() {
        let repo = seeded().await;

        let err = repo.delete(1).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::ProductInUse {
                id: 1,
                references: 2
            }
        ));
        assert!(repo.get_by_id(1).await.unwrap().is_some());

        let core: CoreError = ProductStore::delete(&repo, 3).await.unwrap_err();
        assert!(matches!(core, CoreError::ProductInUse { id: 3, .. }));
    }

    #[tokio::test]
    async fn test_delete_unreferenced_product() {
        let repo = seeded().await;
        let created = repo
            .insert(&NewProduct::new("Kaas", 5, Money::from_cents(350)))
            .await
            .unwrap();

        assert_eq!(repo.delete(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
        assert_eq!(repo.delete(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_contract_maps_validation() {
        let repo = seeded().await;
        let err = ProductStore::add(&repo, NewProduct::new("", 1, Money::zero()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
