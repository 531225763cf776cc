//! Sync Service
//!
//! Pulls the latest remote documents into the local cache. The dashboard
//! calls this as a precondition step before aggregating; it is not part of
//! the aggregation itself. Each pull is insert-or-replace, so re-running is
//! harmless.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::{OrderRepository, PosOrderRepository, ProductRepository};
use crate::remote::documents::VariantDoc;
use crate::remote::{RemoteLedger, RemoteMirror};
use crate::utils::AppResult;
use shared::models::{Order, PosOrder};

/// Counts of refreshed records per collection
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub products: usize,
    pub orders: usize,
    pub pos_orders: usize,
}

#[derive(Clone)]
pub struct SyncService {
    mirror: RemoteMirror,
    products: ProductRepository,
    orders: OrderRepository,
    pos_orders: PosOrderRepository,
}

impl SyncService {
    pub fn new(pool: SqlitePool, ledger: RemoteLedger) -> Self {
        Self {
            mirror: RemoteMirror::new(ledger),
            products: ProductRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pos_orders: PosOrderRepository::new(pool),
        }
    }

    /// Pull catalog and both order ledgers from the remote store
    pub async fn refresh_data(&self) -> AppResult<RefreshSummary> {
        // Catalog: products plus their variant children
        let product_docs = self.mirror.fetch_products().await?;
        let variant_docs = self.mirror.fetch_variants().await?;

        let mut variants_by_code: HashMap<String, Vec<VariantDoc>> = HashMap::new();
        for v in variant_docs {
            variants_by_code.entry(v.product.clone()).or_default().push(v);
        }

        let products = product_docs.len();
        for doc in product_docs {
            let variants = variants_by_code.remove(&doc.code).unwrap_or_default();
            self.products.upsert(&doc.into_product(variants)).await?;
        }

        // Online ledger
        let order_docs = self.mirror.fetch_orders().await?;
        let orders = order_docs.len();
        for doc in order_docs {
            self.orders.upsert_from_remote(&Order::from(doc)).await?;
        }

        // Point-of-sale ledger
        let pos_docs = self.mirror.fetch_pos_orders().await?;
        let pos_orders = pos_docs.len();
        for doc in pos_docs {
            self.pos_orders
                .upsert_from_remote(&PosOrder::from(doc))
                .await?;
        }

        let summary = RefreshSummary {
            products,
            orders,
            pos_orders,
        };
        tracing::info!(
            products = summary.products,
            orders = summary.orders,
            pos_orders = summary.pos_orders,
            "Local cache refreshed from remote ledger"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::db::DbService;
    use shared::models::{OrderItem, ProductCreate, VariantDraft};
    use shared::util::new_id;

    #[tokio::test]
    async fn refresh_rebuilds_an_empty_cache_from_remote() {
        let ledger = RemoteLedger::in_memory().await.unwrap();

        // Populate the remote side through the normal write paths
        let seed_db = DbService::in_memory().await.unwrap();
        let catalog = CatalogService::new(seed_db.pool.clone(), ledger.clone());
        catalog
            .create_product(ProductCreate {
                name: "Basic Tee".into(),
                description: None,
                category: "shirts".into(),
                image: None,
                price: 19.5,
                variants: vec![VariantDraft {
                    sku: "TEE-M".into(),
                    size: "M".into(),
                    color: "black".into(),
                    price: 19.5,
                    stock: 3,
                }],
            })
            .await
            .unwrap();

        let order_id = new_id();
        RemoteMirror::new(ledger.clone())
            .append_order(&Order {
                id: order_id.clone(),
                customer_id: None,
                placed_at: 1_000,
                subtotal: 19.5,
                discount: 0.0,
                total: 19.5,
                promotion_id: None,
                address_line: None,
                payment_method: "card".into(),
                items: vec![OrderItem {
                    order_id: order_id.clone(),
                    product_code: "PROD-001".into(),
                    name: "Basic Tee".into(),
                    sku: "TEE-M".into(),
                    unit_price: 19.5,
                    quantity: 1,
                    image: None,
                }],
            })
            .await
            .unwrap();

        // A different device with an empty cache pulls everything down
        let fresh_db = DbService::in_memory().await.unwrap();
        let sync = SyncService::new(fresh_db.pool.clone(), ledger);
        let summary = sync.refresh_data().await.unwrap();

        assert_eq!(summary.products, 1);
        assert_eq!(summary.orders, 1);
        assert_eq!(summary.pos_orders, 0);

        let product = ProductRepository::new(fresh_db.pool.clone())
            .find_by_code("PROD-001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.variants.len(), 1);

        let order = OrderRepository::new(fresh_db.pool)
            .find_by_id(&order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.items.len(), 1);
    }
}
