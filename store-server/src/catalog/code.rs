//! Product Code Format

/// Prefix for all sequential product codes
pub const PRODUCT_CODE_PREFIX: &str = "PROD-";

/// Render a counter value as a product code.
///
/// The number is zero-padded to at least three digits; from the 1000th
/// allocation on, the numeric part simply widens ("PROD-999" → "PROD-1000"),
/// so every code stays unique and codes sort numerically within a width.
pub fn format_product_code(n: i64) -> String {
    format!("{PRODUCT_CODE_PREFIX}{n:03}")
}
