//! Online Order Model
//!
//! Orders are append-only: once placed they are never mutated (no edit or
//! cancel path). The aggregator only reads this ledger.

use serde::{Deserialize, Serialize};

/// Online order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub customer_id: Option<String>,
    /// Placement time (Unix millis)
    pub placed_at: i64,
    /// Sum of line totals in currency unit, before promotion
    pub subtotal: f64,
    /// Promotion discount in currency unit
    pub discount: f64,
    /// Amount charged in currency unit
    pub total: f64,
    pub promotion_id: Option<String>,
    /// Delivery address snapshot (one line), if the customer chose one
    pub address_line: Option<String>,
    /// How the order was paid ("card", "cash_on_delivery", ...)
    pub payment_method: String,

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Online order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_id: String,
    pub product_code: String,
    pub name: String,
    pub sku: String,
    /// Unit price in currency unit
    pub unit_price: f64,
    pub quantity: i64,
    pub image: Option<String>,
}

/// Checkout payload, turning the customer's cart into an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer_id: String,
    /// Optional promotion to apply (by promotion id)
    pub promotion_id: Option<String>,
    /// Optional address from the customer's address book
    pub address_id: Option<String>,
    /// Defaults to "card" when omitted
    pub payment_method: Option<String>,
}
