use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal scale for invoice currency amounts (cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a currency amount to cents.
///
/// The crate-wide rounding rule is half-away-from-zero: 9.975 rounds to 9.98,
/// never to 9.97. Banker's rounding (`round_dp`) is deliberately not used so
/// that tax amounts are reproducible bit-for-bit across runs and platforms.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display with exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}
