//! Point-of-Sale Order Model (门店销售)
//!
//! The physical ledger. Same append-only rule as online orders; the two
//! ledgers are owned independently and only ever merged by the aggregator.

use serde::{Deserialize, Serialize};

/// Point-of-sale order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PosOrder {
    pub id: String,
    /// Snowflake-style receipt number printed on the ticket
    pub receipt_number: i64,
    /// Admin (cashier) who rang the sale
    pub admin_id: Option<String>,
    /// Sale time (Unix millis), same representation as the online ledger
    pub placed_at: i64,
    /// Amount charged in currency unit
    pub total: f64,
    /// How the sale was paid ("cash", "card")
    pub payment_method: String,

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<PosOrderItem>,
}

/// Point-of-sale order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PosOrderItem {
    pub pos_order_id: String,
    pub product_code: String,
    pub name: String,
    pub sku: String,
    /// Unit price in currency unit
    pub unit_price: f64,
    pub quantity: i64,
    pub image: Option<String>,
}

/// POS line entry: the cashier picks a variant and a quantity; name, price
/// and image are resolved from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosLineDraft {
    pub product_code: String,
    pub sku: String,
    pub quantity: i64,
}

/// Create POS order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosOrderCreate {
    pub lines: Vec<PosLineDraft>,
    /// Defaults to "cash" when omitted
    pub payment_method: Option<String>,
}
