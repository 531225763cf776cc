//! Code Counter Model

use serde::{Deserialize, Serialize};

/// Shared counter record from which sequential product codes are minted.
///
/// Lives in the remote ledger as `counter:product_code`. Created lazily on
/// first allocation (absent record reads as count 0), incremented by every
/// allocation, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeCounter {
    pub count: i64,
}
