//! Promotion Model

use serde::{Deserialize, Serialize};

/// Percentage promotion with a validity window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Promotion {
    pub id: String,
    pub name: String,
    /// Discount in percent (e.g. 15 = 15% off the subtotal)
    pub percent: f64,
    /// Window start (Unix millis, inclusive)
    pub starts_at: i64,
    /// Window end (Unix millis, inclusive)
    pub ends_at: i64,
    pub is_active: bool,
}

impl Promotion {
    /// Whether the promotion applies at the given instant
    pub fn is_current(&self, now_millis: i64) -> bool {
        self.is_active && self.starts_at <= now_millis && now_millis <= self.ends_at
    }
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCreate {
    pub name: String,
    pub percent: f64,
    pub starts_at: i64,
    pub ends_at: i64,
}

/// Update promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionUpdate {
    pub name: Option<String>,
    pub percent: Option<f64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_window_is_inclusive_on_both_ends() {
        let p = Promotion {
            id: "promo-1".into(),
            name: "spring".into(),
            percent: 10.0,
            starts_at: 100,
            ends_at: 200,
            is_active: true,
        };
        assert!(p.is_current(100));
        assert!(p.is_current(200));
        assert!(!p.is_current(99));
        assert!(!p.is_current(201));
    }

    #[test]
    fn inactive_promotion_never_applies() {
        let p = Promotion {
            id: "promo-2".into(),
            name: "off".into(),
            percent: 10.0,
            starts_at: 0,
            ends_at: i64::MAX,
            is_active: false,
        };
        assert!(!p.is_current(50));
    }
}
