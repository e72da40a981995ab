use rust_decimal::Decimal;

use crate::core::money::{format_amount, round_cents};
use crate::core::Result;
use crate::modules::invoices::models::{Invoice, InvoiceItem};
use crate::modules::taxes::services::TaxCalculator;

/// Assembles invoices from cart contents and renders them for display.
pub struct InvoiceService {
    calculator: TaxCalculator,
}

impl InvoiceService {
    pub fn new() -> Self {
        Self {
            calculator: TaxCalculator::new(),
        }
    }

    /// Build a full invoice snapshot for a cart.
    pub fn build(
        &self,
        items: Vec<InvoiceItem>,
        discount: Decimal,
        jurisdiction: Option<&str>,
    ) -> Result<Invoice> {
        Invoice::new(items, discount, jurisdiction, &self.calculator)
    }

    /// Quick single-figure total preview before the jurisdiction is known:
    /// subtotal grossed up by the blended rate.
    pub fn preview_total(&self, subtotal: Decimal, jurisdiction: Option<&str>) -> Decimal {
        let rate = self.calculator.combined_rate(jurisdiction);
        round_cents(subtotal + subtotal * rate)
    }

    /// Render the invoice as display-ready text lines, one per row of the
    /// printable receipt.
    pub fn render_lines(&self, invoice: &Invoice) -> Vec<String> {
        let mut lines = Vec::with_capacity(invoice.items.len() + invoice.tax_lines.len() + 4);

        for item in &invoice.items {
            lines.push(format!(
                "{} x{} @ {} = {}",
                item.product_name,
                item.quantity,
                format_amount(item.unit_price),
                format_amount(item.subtotal.unwrap_or(Decimal::ZERO)),
            ));
        }

        lines.push(format!("Subtotal: {}", format_amount(invoice.subtotal)));

        for tax in &invoice.tax_lines {
            lines.push(format!("{}: {}", tax.name, format_amount(tax.amount)));
        }

        if invoice.discount > Decimal::ZERO {
            lines.push(format!("Discount: -{}", format_amount(invoice.discount)));
        }

        lines.push(format!("Total: {}", format_amount(invoice.total)));

        lines
    }
}

impl Default for InvoiceService {
    fn default() -> Self {
        Self::new()
    }
}
