use crate::error::{CatalogError, Result};
use crate::model::Sweet;
use crate::store::CatalogStore;

/// Quantity state machine over catalog entries.
///
/// Every mutation is a single conditional UPDATE in the store, so a
/// check-then-decrement race between concurrent purchases cannot drive
/// quantity negative. Failures never mutate state.
#[derive(Clone)]
pub struct InventoryEngine {
    store: CatalogStore,
}

impl InventoryEngine {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Purchase `quantity` units of a sweet.
    ///
    /// Errors, in order of precedence: `InvalidQuantity` for zero or
    /// negative amounts, `NotFound` for an unknown id, `OutOfStock` when the
    /// shelf is empty, `InsufficientStock` when it holds less than requested.
    pub async fn purchase(&self, id: i64, quantity: i64) -> Result<Sweet> {
        if quantity <= 0 {
            return Err(CatalogError::InvalidQuantity);
        }

        if let Some(sweet) = self.store.decrement_quantity(id, quantity).await? {
            tracing::info!(id, quantity, remaining = sweet.quantity, "purchase");
            return Ok(sweet);
        }

        // The conditional update matched nothing: the sweet is gone or the
        // stock is short. Re-read to report which.
        let sweet = self.store.get(id).await?;
        if sweet.quantity == 0 {
            Err(CatalogError::OutOfStock)
        } else {
            Err(CatalogError::InsufficientStock {
                available: sweet.quantity,
                requested: quantity,
            })
        }
    }

    /// Restock a sweet by `quantity` units. Zero is a no-op success; there
    /// is no upper bound.
    pub async fn restock(&self, id: i64, quantity: i64) -> Result<Sweet> {
        if quantity < 0 {
            return Err(CatalogError::InvalidQuantity);
        }

        let sweet = self
            .store
            .increment_quantity(id, quantity)
            .await?
            .ok_or(CatalogError::NotFound)?;

        tracing::info!(id, quantity, total = sweet.quantity, "restock");
        Ok(sweet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewSweet;
    use crate::test_util::test_pool;

    async fn setup(quantity: i64) -> (CatalogStore, InventoryEngine, i64) {
        let store = CatalogStore::new(test_pool().await);
        let engine = InventoryEngine::new(store.clone());
        let sweet = store
            .create(NewSweet {
                name: "Choc".to_string(),
                category: "chocolate".to_string(),
                price: 5.99,
                quantity,
            })
            .await
            .unwrap();
        (store, engine, sweet.id)
    }

    #[tokio::test]
    async fn test_purchase_decrements() {
        let (_store, engine, id) = setup(10).await;

        let sweet = engine.purchase(id, 3).await.unwrap();
        assert_eq!(sweet.quantity, 7);
    }

    #[tokio::test]
    async fn test_purchase_entire_stock() {
        let (_store, engine, id) = setup(10).await;

        let sweet = engine.purchase(id, 10).await.unwrap();
        assert_eq!(sweet.quantity, 0);
    }

    #[tokio::test]
    async fn test_purchase_insufficient_stock_reports_figures() {
        let (store, engine, id) = setup(7).await;

        let err = engine.purchase(id, 100).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InsufficientStock {
                available: 7,
                requested: 100
            }
        ));

        // Failed purchase never mutates state.
        assert_eq!(store.get(id).await.unwrap().quantity, 7);
    }

    #[tokio::test]
    async fn test_purchase_out_of_stock() {
        let (store, engine, id) = setup(0).await;

        let err = engine.purchase(id, 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::OutOfStock));
        assert_eq!(store.get(id).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_purchase_missing_sweet() {
        let (_store, engine, _id) = setup(5).await;
        assert!(matches!(
            engine.purchase(999, 1).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_purchase_rejects_non_positive_quantity() {
        let (store, engine, id) = setup(5).await;

        assert!(matches!(
            engine.purchase(id, 0).await,
            Err(CatalogError::InvalidQuantity)
        ));
        assert!(matches!(
            engine.purchase(id, -3).await,
            Err(CatalogError::InvalidQuantity)
        ));
        assert_eq!(store.get(id).await.unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_restock_increments() {
        let (_store, engine, id) = setup(7).await;

        let sweet = engine.restock(id, 5).await.unwrap();
        assert_eq!(sweet.quantity, 12);
    }

    #[tokio::test]
    async fn test_restock_zero_is_noop() {
        let (_store, engine, id) = setup(7).await;

        let sweet = engine.restock(id, 0).await.unwrap();
        assert_eq!(sweet.quantity, 7);
    }

    #[tokio::test]
    async fn test_restock_missing_and_negative() {
        let (_store, engine, id) = setup(7).await;

        assert!(matches!(
            engine.restock(999, 5).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            engine.restock(id, -1).await,
            Err(CatalogError::InvalidQuantity)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_purchases_never_oversell() {
        let (store, engine, id) = setup(10).await;

        let mut handles = Vec::new();
        for _ in 0..25 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move { engine.purchase(id, 1).await }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        // Exactly the available stock is sold, never more.
        assert_eq!(successes, 10);
        let sweet = store.get(id).await.unwrap();
        assert_eq!(sweet.quantity, 0);
    }

    #[tokio::test]
    async fn test_concurrent_purchase_and_restock_keeps_quantity_non_negative() {
        let (store, engine, id) = setup(5).await;

        let mut handles = Vec::new();
        for i in 0..20 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    engine.restock(id, 2).await.map(|_| 0)
                } else {
                    engine.purchase(id, 2).await.map(|s| s.quantity)
                }
            }));
        }

        for handle in handles {
            let _ = handle.await.unwrap();
        }

        assert!(store.get(id).await.unwrap().quantity >= 0);
    }
}
