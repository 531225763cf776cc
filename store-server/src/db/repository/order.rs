//! Online Order Repository
//!
//! The online ledger. Orders are inserted once and never mutated; aggregate
//! queries power the dashboard.

use sqlx::SqlitePool;

use super::{BaseRepository, RepoResult};
use shared::models::{BestSeller, Order, OrderItem};

/// Number of best sellers each ledger contributes
pub const BEST_SELLER_LIMIT: i64 = 3;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Append a placed order with its line items (one transaction)
    pub async fn insert(&self, order: &Order) -> RepoResult<()> {
        let mut tx = self.base.pool().begin().await?;

        sqlx::query(
            "INSERT INTO orders \
             (id, customer_id, placed_at, subtotal, discount, total, promotion_id, address_line, payment_method) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.placed_at)
        .bind(order.subtotal)
        .bind(order.discount)
        .bind(order.total)
        .bind(&order.promotion_id)
        .bind(&order.address_line)
        .bind(&order.payment_method)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items \
                 (order_id, product_code, name, sku, unit_price, quantity, image) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&item.order_id)
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
    pub async fn upsert_from_remote(&self, order: &Order) -> RepoResult<()> {
        let mut tx = self.base.pool().begin().await?;

        sqlx::query(
            "INSERT OR REPLACE INTO orders \
             (id, customer_id, placed_at, subtotal, discount, total, promotion_id, address_line, payment_method) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.placed_at)
        .bind(order.subtotal)
        .bind(order.discount)
        .bind(order.total)
        .bind(&order.promotion_id)
        .bind(&order.address_line)
        .bind(&order.payment_method)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(&order.id)
            .execute(&mut *tx)
            .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items \
                 (order_id, product_code, name, sku, unit_price, quantity, image) \
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

    /// Find one order with items attached
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };
        order.items = self.items_of(id).await?;
        Ok(Some(order))
    }

    /// A customer's order history, newest first
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = sqlx::query_as(
            "SELECT * FROM orders WHERE customer_id = ?1 ORDER BY placed_at DESC",
        )
        .bind(customer_id)
        .fetch_all(self.base.pool())
        .await?;

        for order in &mut orders {
            order.items = self.items_of(&order.id).await?;
        }
        Ok(orders)
    }

    async fn items_of(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> =
            sqlx::query_as("SELECT * FROM order_items WHERE order_id = ?1 ORDER BY rowid")
                .bind(order_id)
                .fetch_all(self.base.pool())
                .await?;
        Ok(items)
    }

    // =========================================================================
    // Dashboard aggregates. Range bounds are inclusive Unix millis
    // =========================================================================

    /// Revenue sum within `[start, end]`
    pub async fn revenue_between(&self, start: i64, end: i64) -> RepoResult<f64> {
        let (revenue,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0.0) FROM orders WHERE placed_at BETWEEN ?1 AND ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.base.pool())
        .await?;
        Ok(revenue)
    }

    /// Order count within `[start, end]`
    pub async fn count_between(&self, start: i64, end: i64) -> RepoResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE placed_at BETWEEN ?1 AND ?2")
                .bind(start)
                .bind(end)
                .fetch_one(self.base.pool())
                .await?;
        Ok(count)
    }

    /// Units sold within `[start, end]`
    pub async fn items_sold_between(&self, start: i64, end: i64) -> RepoResult<i64> {
        let (sold,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(oi.quantity), 0) FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
             WHERE o.placed_at BETWEEN ?1 AND ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.base.pool())
        .await?;
        Ok(sold)
    }

    /// Top products by quantity within `[start, end]`.
    ///
    /// Grouping is by exact product name; the representative image is any
    /// non-empty one within the group (MAX over NULLIF keeps it deterministic).
    pub async fn best_sellers_between(&self, start: i64, end: i64) -> RepoResult<Vec<BestSeller>> {
        let rows: Vec<BestSeller> = sqlx::query_as(
            "SELECT oi.name AS name, \
                    MAX(NULLIF(oi.image, '')) AS image, \
                    SUM(oi.quantity) AS quantity, \
                    SUM(oi.unit_price * oi.quantity) AS revenue \
             FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
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
    use shared::util::new_id;

    fn order_with(total: f64, placed_at: i64, lines: &[(&str, f64, i64)]) -> Order {
        let id = new_id();
        Order {
            id: id.clone(),
            customer_id: Some("cust-1".into()),
            placed_at,
            subtotal: total,
            discount: 0.0,
            total,
            promotion_id: None,
            address_line: None,
            payment_method: "card".into(),
            items: lines
                .iter()
                .map(|(name, price, qty)| OrderItem {
                    order_id: id.clone(),
                    product_code: "PROD-001".into(),
                    name: (*name).into(),
                    sku: format!("{name}-SKU"),
                    unit_price: *price,
                    quantity: *qty,
                    image: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn aggregates_respect_inclusive_bounds() {
        let db = DbService::in_memory().await.unwrap();
        let repo = OrderRepository::new(db.pool.clone());

        repo.insert(&order_with(10.0, 1_000, &[("Shirt", 10.0, 1)]))
            .await
            .unwrap();
        repo.insert(&order_with(20.0, 2_000, &[("Shirt", 10.0, 2)]))
            .await
            .unwrap();
        // Outside the queried range
        repo.insert(&order_with(99.0, 3_000, &[("Hat", 99.0, 1)]))
            .await
            .unwrap();

        assert_eq!(repo.revenue_between(1_000, 2_000).await.unwrap(), 30.0);
        assert_eq!(repo.count_between(1_000, 2_000).await.unwrap(), 2);
        assert_eq!(repo.items_sold_between(1_000, 2_000).await.unwrap(), 3);

        // Boundaries are inclusive on both ends
        assert_eq!(repo.count_between(2_000, 3_000).await.unwrap(), 2);
        assert_eq!(repo.count_between(2_001, 2_999).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn best_sellers_rank_by_quantity_then_revenue_then_name() {
        let db = DbService::in_memory().await.unwrap();
        let repo = OrderRepository::new(db.pool.clone());

        repo.insert(&order_with(
            100.0,
            1_500,
            &[("Shirt", 10.0, 5), ("Hat", 25.0, 2)],
        ))
        .await
        .unwrap();
        // Same quantity as Hat but lower revenue, name breaks no tie here
        repo.insert(&order_with(30.0, 1_600, &[("Belt", 15.0, 2)]))
            .await
            .unwrap();

        let best = repo.best_sellers_between(0, 10_000).await.unwrap();
        let names: Vec<&str> = best.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Shirt", "Hat", "Belt"]);
        assert_eq!(best[0].quantity, 5);
        assert_eq!(best[1].revenue, 50.0);
    }

    #[tokio::test]
    async fn empty_range_aggregates_to_zero() {
        let db = DbService::in_memory().await.unwrap();
        let repo = OrderRepository::new(db.pool.clone());

        assert_eq!(repo.revenue_between(0, 1).await.unwrap(), 0.0);
        assert_eq!(repo.count_between(0, 1).await.unwrap(), 0);
        assert_eq!(repo.items_sold_between(0, 1).await.unwrap(), 0);
        assert!(repo.best_sellers_between(0, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_from_remote_replaces_items() {
        let db = DbService::in_memory().await.unwrap();
        let repo = OrderRepository::new(db.pool.clone());

        let mut order = order_with(10.0, 1_000, &[("Shirt", 10.0, 1)]);
        repo.insert(&order).await.unwrap();

        order.items = vec![OrderItem {
            order_id: order.id.clone(),
            product_code: "PROD-002".into(),
            name: "Hat".into(),
            sku: "HAT-SKU".into(),
            unit_price: 5.0,
            quantity: 2,
            image: Some("hat.png".into()),
        }];
        repo.upsert_from_remote(&order).await.unwrap();

        let found = repo.find_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].name, "Hat");
    }
}
