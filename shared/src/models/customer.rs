//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Creation time (Unix millis)
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Address book entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Address {
    pub id: String,
    pub customer_id: String,
    /// Display label ("home", "office")
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub is_default: bool,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub is_default: bool,
}
