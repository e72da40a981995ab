use rust_decimal::Decimal;

use super::tax_table::JurisdictionTaxTable;
use crate::core::error::AppError;
use crate::core::money::round_cents;
use crate::modules::taxes::models::tax_line::{TaxLine, ESTIMATED_TAXES_LABEL};

/// TaxCalculator produces per-jurisdiction tax lines for a subtotal.
///
/// Pure and deterministic: the same subtotal and jurisdiction always produce
/// bit-identical lines, which is what the invoice snapshot tests rely on.
pub struct TaxCalculator {
    table: &'static JurisdictionTaxTable,
}

impl TaxCalculator {
    pub fn new() -> Self {
        Self {
            table: JurisdictionTaxTable::shared(),
        }
    }

    /// Compute the tax lines owed on `subtotal`.
    ///
    /// A recognized jurisdiction yields one line per table entry, in the
    /// table's disclosure order, each rounded to cents independently. An
    /// unknown or absent jurisdiction falls back to a single
    /// "Estimated Taxes" line at the table-wide average combined rate, so
    /// checkout can show a usable total before the shipping address is known.
    pub fn compute_taxes(
        &self,
        subtotal: Decimal,
        jurisdiction: Option<&str>,
    ) -> Result<Vec<TaxLine>, AppError> {
        self.validate_subtotal(subtotal)?;

        let entries = jurisdiction.and_then(|code| self.table.entries_for(code));

        let lines = match entries {
            Some(entries) => entries
                .iter()
                .map(|entry| {
                    TaxLine::new(entry.name, entry.rate, round_cents(subtotal * entry.rate))
                })
                .collect(),
            None => {
                let rate = self.table.average_combined_rate();
                vec![TaxLine::new(
                    ESTIMATED_TAXES_LABEL,
                    rate,
                    round_cents(subtotal * rate),
                )]
            }
        };

        Ok(lines)
    }

    /// Single blended rate for a jurisdiction: the sum of its entry rates,
    /// or the table-wide average when the jurisdiction is unknown or absent.
    pub fn combined_rate(&self, jurisdiction: Option<&str>) -> Decimal {
        jurisdiction
            .and_then(|code| self.table.entries_for(code))
            .map(JurisdictionTaxTable::combined_rate_of)
            .unwrap_or_else(|| self.table.average_combined_rate())
    }

    /// Whether a jurisdiction code is in the table.
    pub fn recognizes(&self, jurisdiction: &str) -> bool {
        self.table.entries_for(jurisdiction).is_some()
    }

    fn validate_subtotal(&self, subtotal: Decimal) -> Result<(), AppError> {
        if subtotal < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Subtotal cannot be negative, got {}",
                subtotal
            )));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
