//! Shared types for the Mercat store platform
//!
//! Data models and small utilities used by the store server and its tests:
//! catalog records, order ledgers, customers, promotions and the dashboard
//! statistics types.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::{BestSeller, DashboardStats, SalesChannel};
