use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single named tax line on an invoice.
///
/// `amount` is always `round_cents(subtotal * rate)` for the subtotal the
/// line was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Jurisdiction tax label, e.g. "GST", "PST", "HST", "Estimated Taxes"
    pub name: String,
    /// Decimal fraction, 0 < rate < 1
    pub rate: Decimal,
    /// Tax amount in the invoice currency, rounded to cents
    pub amount: Decimal,
}

impl TaxLine {
    pub fn new(name: impl Into<String>, rate: Decimal, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            rate,
            amount,
        }
    }
}

/// Label used for the fallback line when the jurisdiction is unknown.
pub const ESTIMATED_TAXES_LABEL: &str = "Estimated Taxes";
