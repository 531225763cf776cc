//! Catalog Service
//!
//! Product and variant management. Creation allocates the sequential code in
//! the remote ledger first (atomic, no local write before the remote commit
//! succeeds); the local cache is filled afterwards. Updates and deletes touch
//! both sides and propagate any failure.

pub mod allocator;
pub mod code;

pub use allocator::ProductCodeAllocator;
pub use code::{PRODUCT_CODE_PREFIX, format_product_code};

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::db::repository::ProductRepository;
use crate::remote::{RemoteLedger, RemoteMirror};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;

#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
    mirror: RemoteMirror,
    allocator: ProductCodeAllocator,
}

impl CatalogService {
    pub fn new(pool: SqlitePool, ledger: RemoteLedger) -> Self {
        Self {
            products: ProductRepository::new(pool),
            mirror: RemoteMirror::new(ledger.clone()),
            allocator: ProductCodeAllocator::new(ledger),
        }
    }

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.find_all().await?)
    }

    pub async fn get_product(&self, code: &str) -> AppResult<Product> {
        self.products
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", code)))
    }

    /// Allocate a code and persist the product remotely, then cache it locally
    pub async fn create_product(&self, data: ProductCreate) -> AppResult<Product> {
        validate_create(&data)?;

        let product = self.allocator.allocate(&data, now_millis()).await?;
        self.products.upsert(&product).await?;

        tracing::info!(code = %product.code, name = %product.name, "Product created");
        Ok(product)
    }

    /// Update locally, then mirror the merged record to the remote document
    pub async fn update_product(&self, code: &str, data: ProductUpdate) -> AppResult<Product> {
        if let Some(price) = data.price
            && !(price.is_finite() && price >= 0.0)
        {
            return Err(AppError::validation(format!("Invalid price: {}", price)));
        }

        let updated = self.products.update(code, data).await?;
        self.mirror.upsert_product(&updated).await?;
        Ok(updated)
    }

    /// Delete remotely first, then drop the cached row
    pub async fn delete_product(&self, code: &str) -> AppResult<()> {
        if self.products.find_by_code(code).await?.is_none() {
            return Err(AppError::not_found(format!("Product {}", code)));
        }

        self.mirror.delete_product(code).await?;
        self.products.delete(code).await?;

        tracing::info!(code = %code, "Product deleted");
        Ok(())
    }
}

fn validate_create(data: &ProductCreate) -> AppResult<()> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Product name cannot be empty"));
    }
    if !(data.price.is_finite() && data.price >= 0.0) {
        return Err(AppError::validation(format!(
            "Invalid price: {}",
            data.price
        )));
    }

    let mut seen = HashSet::new();
    for v in &data.variants {
        if v.sku.trim().is_empty() {
            return Err(AppError::validation("Variant SKU cannot be empty"));
        }
        if !(v.price.is_finite() && v.price >= 0.0) {
            return Err(AppError::validation(format!(
                "Invalid variant price: {}",
                v.price
            )));
        }
        if v.stock < 0 {
            return Err(AppError::validation(format!(
                "Invalid variant stock: {}",
                v.stock
            )));
        }
        if !seen.insert(v.sku.as_str()) {
            return Err(AppError::validation(format!("Duplicate SKU: {}", v.sku)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::VariantDraft;

    async fn service() -> CatalogService {
        let db = DbService::in_memory().await.unwrap();
        let ledger = RemoteLedger::in_memory().await.unwrap();
        CatalogService::new(db.pool, ledger)
    }

    fn tee(variants: Vec<VariantDraft>) -> ProductCreate {
        ProductCreate {
            name: "Basic Tee".into(),
            description: Some("Cotton".into()),
            category: "shirts".into(),
            image: None,
            price: 19.5,
            variants,
        }
    }

    #[tokio::test]
    async fn create_allocates_and_caches_locally() {
        let svc = service().await;
        let created = svc.create_product(tee(vec![])).await.unwrap();
        assert_eq!(created.code, "PROD-001");

        let cached = svc.get_product("PROD-001").await.unwrap();
        assert_eq!(cached.name, "Basic Tee");
    }

    #[tokio::test]
    async fn duplicate_sku_in_payload_is_rejected_before_allocation() {
        let svc = service().await;
        let dup = VariantDraft {
            sku: "TEE-M".into(),
            size: "M".into(),
            color: "black".into(),
            price: 19.5,
            stock: 1,
        };
        let err = svc
            .create_product(tee(vec![dup.clone(), dup]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was minted
        let next = svc.create_product(tee(vec![])).await.unwrap();
        assert_eq!(next.code, "PROD-001");
    }

    #[tokio::test]
    async fn update_merges_and_mirrors() {
        let svc = service().await;
        svc.create_product(tee(vec![])).await.unwrap();

        let updated = svc
            .update_product(
                "PROD-001",
                ProductUpdate {
                    name: None,
                    description: None,
                    category: None,
                    image: Some("tee.png".into()),
                    price: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.image, "tee.png");
        assert_eq!(updated.name, "Basic Tee");
    }

    #[tokio::test]
    async fn delete_removes_both_sides() {
        let svc = service().await;
        svc.create_product(tee(vec![])).await.unwrap();
        svc.delete_product("PROD-001").await.unwrap();

        assert!(matches!(
            svc.get_product("PROD-001").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
