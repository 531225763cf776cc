//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `code` is the human-readable sequential identifier ("PROD-001") minted by
/// the allocator; it keys both the local row and the remote document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category name (flat, no category table in this store)
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Base price in currency unit
    pub price: f64,
    pub is_active: bool,
    /// Creation time (Unix millis)
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

/// Product variant entity, keyed by its SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub sku: String,
    /// Parent product code; always equals the parent's `code`
    pub product_code: String,
    pub size: String,
    pub color: String,
    /// Price in currency unit
    pub price: f64,
    pub stock: i64,
}

/// Variant payload before the parent code exists.
///
/// The allocator overwrites `product_code` with the minted code, so callers
/// leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDraft {
    pub sku: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
}

/// Create product payload (no pre-assigned code; the allocator assigns it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub image: Option<String>,
    pub price: f64,
    /// May be empty
    #[serde(default)]
    pub variants: Vec<VariantDraft>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}
