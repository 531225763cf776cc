//! Dashboard Statistics Models
//!
//! Ephemeral, computed values: recomputed on every query, never persisted.

use serde::{Deserialize, Serialize};

/// Dashboard channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesChannel {
    /// Online orders only
    Online,
    /// Point-of-sale orders only
    Physical,
    /// Both ledgers merged
    Summary,
}

/// Ranking of one product by quantity sold within the queried range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BestSeller {
    pub name: String,
    pub image: Option<String>,
    pub quantity: i64,
    /// Revenue attributable to this product in currency unit
    pub revenue: f64,
}

/// Result of one aggregation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub channel: SalesChannel,
    /// 1-based month the stats cover
    pub month: u32,
    pub year: i32,
    /// Revenue in currency unit
    pub revenue: f64,
    pub orders: i64,
    pub items_sold: i64,
    /// Top 3 products by quantity
    pub best_sellers: Vec<BestSeller>,
}
