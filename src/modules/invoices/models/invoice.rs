// A full invoice: cart items, subtotal, jurisdiction tax lines, discount,
// and the grand total. Totals are computed once at construction so the
// resulting invoice is a stable snapshot for rendering and regression tests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::InvoiceItem;
use crate::core::money::round_cents;
use crate::core::{AppError, Result};
use crate::modules::taxes::models::TaxLine;
use crate::modules::taxes::services::TaxCalculator;

/// A rendered invoice snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique invoice ID (UUID)
    pub invoice_id: String,

    /// When the invoice was issued
    pub date: DateTime<Utc>,

    /// Jurisdiction the taxes were computed for, when known
    pub jurisdiction: Option<String>,

    /// Cart items
    pub items: Vec<InvoiceItem>,

    /// Sum of item subtotals, rounded to cents
    pub subtotal: Decimal,

    /// Tax lines in disclosure order
    pub tax_lines: Vec<TaxLine>,

    /// Discount applied to the subtotal
    pub discount: Decimal,

    /// subtotal - discount + sum(tax_lines.amount), rounded to cents
    pub total: Decimal,
}

impl Invoice {
    /// Build an invoice from cart items.
    ///
    /// The subtotal is taxed before the discount is subtracted, matching the
    /// store's receipt layout where the discount is a post-tax credit.
    pub fn new(
        mut items: Vec<InvoiceItem>,
        discount: Decimal,
        jurisdiction: Option<&str>,
        calculator: &TaxCalculator,
    ) -> Result<Self> {
        Self::validate_items(&items)?;

        let raw_subtotal: Decimal = items.iter_mut().map(|item| item.get_subtotal()).sum();
        let subtotal = round_cents(raw_subtotal);

        Self::validate_discount(discount, subtotal)?;

        let tax_lines = calculator.compute_taxes(subtotal, jurisdiction)?;
        let tax_total: Decimal = tax_lines.iter().map(|line| line.amount).sum();
        let total = round_cents(subtotal - discount + tax_total);

        Ok(Self {
            invoice_id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            jurisdiction: jurisdiction.map(|j| j.trim().to_uppercase()),
            items,
            subtotal,
            tax_lines,
            discount,
            total,
        })
    }

    /// Sum of the tax line amounts
    pub fn tax_total(&self) -> Decimal {
        self.tax_lines.iter().map(|line| line.amount).sum()
    }

    fn validate_items(items: &[InvoiceItem]) -> Result<()> {
        if items.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one item",
            ));
        }

        Ok(())
    }

    fn validate_discount(discount: Decimal, subtotal: Decimal) -> Result<()> {
        if discount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Discount must be non-negative, got: {}",
                discount
            )));
        }

        if discount > subtotal {
            return Err(AppError::validation(format!(
                "Discount {} cannot exceed subtotal {}",
                discount, subtotal
            )));
        }

        Ok(())
    }
}
