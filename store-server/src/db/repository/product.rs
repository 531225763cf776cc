//! Product Repository

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Product, ProductUpdate, ProductVariant};

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find all active products with their variants attached
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> =
            sqlx::query_as("SELECT * FROM products WHERE is_active = 1 ORDER BY code")
                .fetch_all(self.base.pool())
                .await?;

        let variants: Vec<ProductVariant> = sqlx::query_as(
            "SELECT v.* FROM product_variants v \
             JOIN products p ON p.code = v.product_code \
             WHERE p.is_active = 1 ORDER BY v.sku",
        )
        .fetch_all(self.base.pool())
        .await?;

        let mut by_code: HashMap<String, Vec<ProductVariant>> = HashMap::new();
        for v in variants {
            by_code.entry(v.product_code.clone()).or_default().push(v);
        }
        for p in &mut products {
            p.variants = by_code.remove(&p.code).unwrap_or_default();
        }
        Ok(products)
    }

    /// Find one product by code with variants attached
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE code = ?1")
            .bind(code)
            .fetch_optional(self.base.pool())
            .await?;

        let Some(mut product) = product else {
            return Ok(None);
        };

        product.variants =
            sqlx::query_as("SELECT * FROM product_variants WHERE product_code = ?1 ORDER BY sku")
                .bind(code)
                .fetch_all(self.base.pool())
                .await?;

        Ok(Some(product))
    }

    /// Find one variant of a product
    pub async fn find_variant(&self, code: &str, sku: &str) -> RepoResult<Option<ProductVariant>> {
        let variant: Option<ProductVariant> = sqlx::query_as(
            "SELECT * FROM product_variants WHERE product_code = ?1 AND sku = ?2",
        )
        .bind(code)
        .bind(sku)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(variant)
    }

    /// Cache a product and its variants (insert-or-replace, one transaction).
    ///
    /// Used both after a successful remote allocation and by the sync pull.
    pub async fn upsert(&self, product: &Product) -> RepoResult<()> {
        let mut tx = self.base.pool().begin().await?;

        sqlx::query(
            "INSERT OR REPLACE INTO products \
             (code, name, description, category, image, price, is_active, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .bind(product.price)
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM product_variants WHERE product_code = ?1")
            .bind(&product.code)
            .execute(&mut *tx)
            .await?;

        for v in &product.variants {
            sqlx::query(
                "INSERT INTO product_variants (sku, product_code, size, color, price, stock) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(&v.sku)
            .bind(&v.product_code)
            .bind(&v.size)
            .bind(&v.color)
            .bind(v.price)
            .bind(v.stock)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Update a product (dynamic SET, only fields that are present)
    pub async fn update(&self, code: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut set_parts: Vec<&str> = Vec::new();

        if data.name.is_some() {
            set_parts.push("name = ?");
        }
        if data.description.is_some() {
            set_parts.push("description = ?");
        }
        if data.category.is_some() {
            set_parts.push("category = ?");
        }
        if data.image.is_some() {
            set_parts.push("image = ?");
        }
        if data.price.is_some() {
            set_parts.push("price = ?");
        }
        if data.is_active.is_some() {
            set_parts.push("is_active = ?");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_code(code)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", code)));
        }

        let query_str = format!(
            "UPDATE products SET {} WHERE code = ?",
            set_parts.join(", ")
        );

        let mut query = sqlx::query(&query_str);
        if let Some(v) = data.name {
            query = query.bind(v);
        }
        if let Some(v) = data.description {
            query = query.bind(v);
        }
        if let Some(v) = data.category {
            query = query.bind(v);
        }
        if let Some(v) = data.image {
            query = query.bind(v);
        }
        if let Some(v) = data.price {
            query = query.bind(v);
        }
        if let Some(v) = data.is_active {
            query = query.bind(v);
        }
        let result = query.bind(code).execute(self.base.pool()).await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Product {} not found", code)));
        }

        self.find_by_code(code)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", code)))
    }

    /// Hard delete a product (variants cascade)
    pub async fn delete(&self, code: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE code = ?1")
            .bind(code)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Product {} not found", code)));
        }
        Ok(())
    }
}
