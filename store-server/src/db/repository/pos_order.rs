//! Point-of-Sale Order Repository
//!
//! The physical ledger. Same append-only shape as the online ledger but an
//! independent table family; the aggregator never joins across the two.

use sqlx::SqlitePool;

use super::order::BEST_SELLER_LIMIT;
use super::{BaseRepository, RepoResult};
use shared::models::{BestSeller, PosOrder, PosOrderItem};

#[derive(Clone)]
pub struct PosOrderRepository {
    base: BaseRepository,
}

impl PosOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Append a rung-up sale with its line items (one transaction)
    pub async fn insert(&self, order: &PosOrder) -> RepoResult<()> {
        let mut tx = self.base.pool().begin().await?;

        sqlx::query(
            "INSERT INTO pos_orders \
             (id, receipt_number, admin_id, placed_at, total, payment_method) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&order.id)
        .bind(order.receipt_number)
        .bind(&order.admin_id)
        .bind(order.placed_at)
        .bind(order.total)
        .bind(&order.payment_method)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO pos_order_items \
                 (pos_order_id, product_code, name, sku, unit_price, quantity, image) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&item.pos_order_id)
            .bind(&item.product_code)
            .bind(&item.name)
            .bind(&item.sku)
            .bind(item.unit_price)
            .bind(item.quantity)
            .bind(&item.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insert-or-replace from a remote document (sync pull)
    pub async fn upsert_from_remote(&self, order: &PosOrder) -> RepoResult<()> {
        let mut tx = self.base.pool().begin().await?;

        sqlx::query(
            "INSERT OR REPLACE INTO pos_orders \
             (id, receipt_number, admin_id, placed_at, total, payment_method) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&order.id)
        .bind(order.receipt_number)
        .bind(&order.admin_id)
        .bind(order.placed_at)
        .bind(order.total)
        .bind(&order.payment_method)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM pos_order_items WHERE pos_order_id = ?1")
            .bind(&order.id)
            .execute(&mut *tx)
            .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO pos_order_items \
                 (pos_order_id, product_code, name, sku, unit_price, quantity, image) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&order.id)
            .bind(&item.product_code)
            .bind(&item.name)
            .bind(&item.sku)
            .bind(item.unit_price)
            .bind(item.quantity)
            .bind(&item.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Find one sale with items attached
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PosOrder>> {
        let order: Option<PosOrder> = sqlx::query_as("SELECT * FROM pos_orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };
        order.items = sqlx::query_as(
            "SELECT * FROM pos_order_items WHERE pos_order_id = ?1 ORDER BY rowid",
        )
        .bind(id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(Some(order))
    }

    /// Sales within `[start, end]`, newest first (back-office listing)
    pub async fn find_between(&self, start: i64, end: i64) -> RepoResult<Vec<PosOrder>> {
        let orders: Vec<PosOrder> = sqlx::query_as(
            "SELECT * FROM pos_orders WHERE placed_at BETWEEN ?1 AND ?2 ORDER BY placed_at DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.base.pool())
        .await?;
        Ok(orders)
    }

    // =========================================================================
    // Dashboard aggregates. Range bounds are inclusive Unix millis
    // =========================================================================

    /// Revenue sum within `[start, end]`
    pub async fn revenue_between(&self, start: i64, end: i64) -> RepoResult<f64> {
        let (revenue,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0.0) FROM pos_orders WHERE placed_at BETWEEN ?1 AND ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.base.pool())
        .await?;
        Ok(revenue)
    }

    /// Sale count within `[start, end]`
    pub async fn count_between(&self, start: i64, end: i64) -> RepoResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM pos_orders WHERE placed_at BETWEEN ?1 AND ?2")
                .bind(start)
                .bind(end)
                .fetch_one(self.base.pool())
                .await?;
        Ok(count)
    }

    /// Units sold within `[start, end]`
    pub async fn items_sold_between(&self, start: i64, end: i64) -> RepoResult<i64> {
        let (sold,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(oi.quantity), 0) FROM pos_order_items oi \
             JOIN pos_orders o ON o.id = oi.pos_order_id \
             WHERE o.placed_at BETWEEN ?1 AND ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.base.pool())
        .await?;
        Ok(sold)
    }

    /// Top products by quantity within `[start, end]` (same ranking rule as
    /// the online ledger)
    pub async fn best_sellers_between(&self, start: i64, end: i64) -> RepoResult<Vec<BestSeller>> {
        let rows: Vec<BestSeller> = sqlx::query_as(
            "SELECT oi.name AS name, \
                    MAX(NULLIF(oi.image, '')) AS image, \
                    SUM(oi.quantity) AS quantity, \
                    SUM(oi.unit_price * oi.quantity) AS revenue \
             FROM pos_order_items oi \
             JOIN pos_orders o ON o.id = oi.pos_order_id \
             WHERE o.placed_at BETWEEN ?1 AND ?2 \
             GROUP BY oi.name \
             ORDER BY quantity DESC, revenue DESC, name ASC \
             LIMIT ?3",
        )
        .bind(start)
        .bind(end)
        .bind(BEST_SELLER_LIMIT)
        .fetch_all(self.base.pool())
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::util::{new_id, snowflake_id};

    #[tokio::test]
    async fn insert_and_aggregate_one_sale() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PosOrderRepository::new(db.pool.clone());

        let id = new_id();
        repo.insert(&PosOrder {
            id: id.clone(),
            receipt_number: snowflake_id(),
            admin_id: Some("admin-1".into()),
            placed_at: 5_000,
            total: 45.0,
            payment_method: "cash".into(),
            items: vec![PosOrderItem {
                pos_order_id: id.clone(),
                product_code: "PROD-001".into(),
                name: "Hat".into(),
                sku: "HAT-M".into(),
                unit_price: 15.0,
                quantity: 3,
                image: Some("hat.png".into()),
            }],
        })
        .await
        .unwrap();

        assert_eq!(repo.revenue_between(0, 10_000).await.unwrap(), 45.0);
        assert_eq!(repo.count_between(0, 10_000).await.unwrap(), 1);
        assert_eq!(repo.items_sold_between(0, 10_000).await.unwrap(), 3);

        let best = repo.best_sellers_between(0, 10_000).await.unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].image.as_deref(), Some("hat.png"));

        let listed = repo.find_between(0, 10_000).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
