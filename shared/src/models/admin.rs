//! Admin User Model

use serde::{Deserialize, Serialize};

/// Back-office user (product management, POS, dashboard).
///
/// Local-only: credential rows are never mirrored to the remote ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: i64,
}
