//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

fn from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value, "Non-finite monetary value treated as zero");
        Decimal::ZERO
    })
}

/// Round to currency precision and convert back to `f64`
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// unit price × quantity
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(from_f64(unit_price) * Decimal::from(quantity))
}

/// Sum of line totals
pub fn subtotal<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let sum = lines
        .into_iter()
        .map(|(price, qty)| from_f64(price) * Decimal::from(qty))
        .sum::<Decimal>();
    to_f64(sum)
}

/// percent% of the amount
pub fn percent_of(amount: f64, percent: f64) -> f64 {
    to_f64(from_f64(amount) * from_f64(percent) / Decimal::from(100))
}

/// a + b at currency precision
pub fn add(a: f64, b: f64) -> f64 {
    to_f64(from_f64(a) + from_f64(b))
}

/// a − b at currency precision
pub fn subtract(a: f64, b: f64) -> f64 {
    to_f64(from_f64(a) - from_f64(b))
}
