//! Cart Repository
//!
//! Local-only table; cleared by checkout, never mirrored.

use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::CartItem;

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// A customer's cart lines
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<CartItem>> {
        let items: Vec<CartItem> =
            sqlx::query_as("SELECT * FROM cart_items WHERE customer_id = ?1 ORDER BY rowid")
                .bind(customer_id)
                .fetch_all(self.base.pool())
                .await?;
        Ok(items)
    }

    /// Add a line; adding the same SKU again accumulates quantity
    pub async fn add(&self, item: &CartItem) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO cart_items \
             (id, customer_id, product_code, sku, name, unit_price, quantity, image) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
             ON CONFLICT (customer_id, sku) \
             DO UPDATE SET quantity = quantity + excluded.quantity",
        )
        .bind(&item.id)
        .bind(&item.customer_id)
        .bind(&item.product_code)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .bind(&item.image)
        .execute(self.base.pool())
        .await?;
        Ok(())
    }

    /// Set a line's quantity; 0 removes the line
    pub async fn set_quantity(&self, line_id: &str, quantity: i64) -> RepoResult<()> {
        if quantity == 0 {
            return self.remove(line_id).await;
        }
        let result = sqlx::query("UPDATE cart_items SET quantity = ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(line_id)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Cart line {} not found",
                line_id
            )));
        }
        Ok(())
    }

    pub async fn remove(&self, line_id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1")
            .bind(line_id)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Cart line {} not found",
                line_id
            )));
        }
        Ok(())
    }

    /// Empty a customer's cart (checkout epilogue)
    pub async fn clear(&self, customer_id: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE customer_id = ?1")
            .bind(customer_id)
            .execute(self.base.pool())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::util::new_id;

    fn line(customer: &str, sku: &str, qty: i64) -> CartItem {
        CartItem {
            id: new_id(),
            customer_id: customer.into(),
            product_code: "PROD-001".into(),
            sku: sku.into(),
            name: "Basic Tee".into(),
            unit_price: 19.5,
            quantity: qty,
            image: None,
        }
    }

    #[tokio::test]
    async fn same_sku_accumulates_quantity() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CartRepository::new(db.pool.clone());

        repo.add(&line("cust-1", "TEE-M", 1)).await.unwrap();
        repo.add(&line("cust-1", "TEE-M", 2)).await.unwrap();

        let items = repo.find_by_customer("cust-1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn zero_quantity_removes_the_line() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CartRepository::new(db.pool.clone());

        let l = line("cust-1", "TEE-M", 2);
        repo.add(&l).await.unwrap();
        repo.set_quantity(&l.id, 0).await.unwrap();

        assert!(repo.find_by_customer("cust-1").await.unwrap().is_empty());
    }
}
