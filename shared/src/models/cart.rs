//! Cart Model
//!
//! Cart rows live only in the local cache; they are cleared by checkout and
//! never mirrored to the remote ledger.

use serde::{Deserialize, Serialize};

/// Cart line entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: String,
    pub customer_id: String,
    pub product_code: String,
    pub sku: String,
    pub name: String,
    /// Unit price in currency unit, snapshotted when added
    pub unit_price: f64,
    pub quantity: i64,
    pub image: Option<String>,
}

/// Add-to-cart payload (price/name resolved from the catalog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAdd {
    pub customer_id: String,
    pub product_code: String,
    pub sku: String,
    pub quantity: i64,
}

/// Change-quantity payload; quantity 0 removes the line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUpdateQuantity {
    pub quantity: i64,
}
