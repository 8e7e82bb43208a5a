//! # Product Store
//!
//! The contract every product store implements, plus the in-memory
//! variant.
//!
//! ## Store Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                    ProductService                                       │
//! │                          │                                              │
//! │                          │ Arc<dyn ProductStore>                        │
//! │            ┌─────────────┴──────────────┐                               │
//! │            ▼                            ▼                               │
//! │  ┌──────────────────────┐    ┌──────────────────────────┐              │
//! │  │ InMemoryProductStore │    │ ProductRepository        │              │
//! │  │ (this module)        │    │ (grocery-db, SQLite)     │              │
//! │  │ Mutex<Vec<Product>>  │    │ products table           │              │
//! │  └──────────────────────┘    └──────────────────────────┘              │
//! │                                                                         │
//! │  Values are copied in and out: no caller holds a reference into the    │
//! │  stored list, so every change goes through `update`.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{NewProduct, Product};
use crate::validation::validate_new_product;

/// CRUD contract over products.
///
/// `Ok(None)` means "no product with that id", never a failure.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in id order.
    async fn get_all(&self) -> CoreResult<Vec<Product>>;

    /// Looks a product up by id.
    async fn get(&self, id: i64) -> CoreResult<Option<Product>>;

    /// Validates and stores a new product; the store assigns the id.
    async fn add(&self, product: NewProduct) -> CoreResult<Product>;

    /// Overwrites every field of the product with the same id.
    async fn update(&self, product: Product) -> CoreResult<Option<Product>>;

    /// Removes the product and returns what was removed.
    async fn delete(&self, id: i64) -> CoreResult<Option<Product>>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Product store backed by a plain list.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given products.
    pub fn from_products(products: Vec<Product>) -> Self {
        InMemoryProductStore {
            products: Mutex::new(products),
        }
    }

    /// Creates a store holding the built-in catalog.
    ///
    /// | id | name       | stock | shelf life | price |
    /// |----|------------|-------|------------|-------|
    /// | 1  | Melk       | 300   | 2025-09-25 | 0.95  |
    /// | 2  | Kaas       | 100   | 2025-09-30 | 7.98  |
    /// | 3  | Brood      | 400   | 2025-09-12 | 2.19  |
    /// | 4  | Cornflakes | 0     | 2025-12-31 | 1.48  |
    pub fn with_catalog() -> Self {
        let catalog = [
            (1, "Melk", 300, (2025, 9, 25), 95),
            (2, "Kaas", 100, (2025, 9, 30), 798),
            (3, "Brood", 400, (2025, 9, 12), 219),
            (4, "Cornflakes", 0, (2025, 12, 31), 148),
        ];

        let products = catalog
            .into_iter()
            .map(|(id, name, stock, (y, m, d), cents)| Product {
                id,
                name: name.to_string(),
                stock,
                shelf_life: NaiveDate::from_ymd_opt(y, m, d),
                price: Money::from_cents(cents),
            })
            .collect();

        Self::from_products(products)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        // Every mutation is a single push/assign/remove.
        self.products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_all(&self) -> CoreResult<Vec<Product>> {
        Ok(self.lock().clone())
    }

    async fn get(&self, id: i64) -> CoreResult<Option<Product>> {
        Ok(self.lock().iter().find(|p| p.id == id).cloned())
    }

    async fn add(&self, product: NewProduct) -> CoreResult<Product> {
        let product = product.trimmed();
        validate_new_product(&product)?;

        let mut products = self.lock();
        let id = products.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        let created = product.into_product(id);
        products.push(created.clone());

        debug!(id, name = %created.name, "Added product to in-memory store");
        Ok(created)
    }

    async fn update(&self, product: Product) -> CoreResult<Option<Product>> {
        validate_new_product(&NewProduct {
            name: product.name.clone(),
            stock: product.stock,
            shelf_life: product.shelf_life,
            price: product.price,
        })?;

        let mut products = self.lock();
        let Some(existing) = products.iter_mut().find(|p| p.id == product.id) else {
            debug!(id = product.id, "Update skipped, product not found");
            return Ok(None);
        };

        *existing = product;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> CoreResult<Option<Product>> {
        let mut products = self.lock();
        let removed = products
            .iter()
            .position(|p| p.id == id)
            .map(|index| products.remove(index));

        debug!(id, found = removed.is_some(), "Deleted product from in-memory store");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
