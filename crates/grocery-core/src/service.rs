//! # Product Service
//!
//! The business-rule layer in front of a [`ProductStore`].
//!
//! ```text
//! caller ──► ProductService ──► Arc<dyn ProductStore>
//!              │
//!              └── add(): AdminGrant required, then validate_new_product()
//! ```
//!
//! The store validates again on its own; neither layer trusts the other.

use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::AdminGrant;
use crate::error::CoreResult;
use crate::store::ProductStore;
use crate::types::{NewProduct, Product};
use crate::validation::validate_new_product;

/// Product operations as seen by front ends.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        ProductService { store }
    }

    pub async fn get_all(&self) -> CoreResult<Vec<Product>> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: i64) -> CoreResult<Option<Product>> {
        self.store.get(id).await
    }

    /// Adds a product on behalf of an authorized admin.
    ///
    /// Invalid input is rejected here, before the store is called.
    pub async fn add(&self, grant: &AdminGrant, product: NewProduct) -> CoreResult<Product> {
        validate_new_product(&product)?;

        let created = self.store.add(product).await?;
        info!(
            id = created.id,
            name = %created.name,
            by = grant.principal(),
            "Product added"
        );
        Ok(created)
    }

    pub async fn update(&self, product: Product) -> CoreResult<Option<Product>> {
        debug!(id = product.id, "Updating product");
        self.store.update(product).await
    }

    pub async fn delete(&self, id: i64) -> CoreResult<Option<Product>> {
        debug!(id, "Deleting product");
        self.store.delete(id).await
    }
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role};
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::store::InMemoryProductStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn admin() -> AdminGrant {
        Principal::new("AdminUser", [Role::Admin])
            .authorize_admin()
            .unwrap()
    }

    /// Store that counts calls to `add` and accepts anything.
    #[derive(Default)]
    struct CountingStore {
        adds: AtomicUsize,
    }

    #[async_trait]
    impl ProductStore for CountingStore {
        async fn get_all(&self) -> CoreResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: i64) -> CoreResult<Option<Product>> {
            Ok(None)
        }

        async fn add(&self, product: NewProduct) -> CoreResult<Product> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            Ok(product.into_product(1))
        }

        async fn update(&self, _product: Product) -> CoreResult<Option<Product>> {
            Ok(None)
        }

        async fn delete(&self, _id: i64) -> CoreResult<Option<Product>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_add_delegates_to_store() {
        let service = ProductService::new(Arc::new(InMemoryProductStore::with_catalog()));

        let created = service
            .add(&admin(), NewProduct::new("Kaas", 5, Money::from_cents(350)))
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(service.get_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_service_rejects_before_store_is_called() {
        let store = Arc::new(CountingStore::default());
        let service = ProductService::new(store.clone());

        let err = service
            .add(&admin(), NewProduct::new("", 1, Money::from_cents(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = service
            .add(&admin(), NewProduct::new("Boter", 1, Money::from_cents(-249)))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(store.adds.load(Ordering::SeqCst), 0);

        service
            .add(&admin(), NewProduct::new("Boter", 1, Money::from_cents(249)))
            .await
            .unwrap();
        assert_eq!(store.adds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_delegate() {
        let service = ProductService::new(Arc::new(InMemoryProductStore::with_catalog()));

        let mut kaas = service.get(2).await.unwrap().unwrap();
        kaas.stock = 90;
        let updated = service.update(kaas).await.unwrap().unwrap();
        assert_eq!(updated.stock, 90);

        let removed = service.delete(2).await.unwrap().unwrap();
        assert_eq!(removed.stock, 90);
        assert_eq!(service.get(2).await.unwrap(), None);
        assert_eq!(service.delete(2).await.unwrap(), None);
    }
}
