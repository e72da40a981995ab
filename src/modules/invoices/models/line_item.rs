// An invoice item is one cart row: a product, its unit price, and a
// quantity. Each item calculates its own subtotal with cent rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::round_cents;
use crate::core::{AppError, Result};

/// A single product row in an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Catalog id of the product
    pub product_id: String,

    /// Display name of the product
    pub product_name: String,

    /// Price per unit
    pub unit_price: Decimal,

    /// Quantity of units
    pub quantity: i32,

    /// Calculated subtotal (quantity × unit_price, rounded to cents)
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

impl InvoiceItem {
    /// Create a new invoice item with validation
    pub fn new(
        product_id: String,
        product_name: String,
        unit_price: Decimal,
        quantity: i32,
    ) -> Result<Self> {
        Self::validate_product_name(&product_name)?;
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(unit_price)?;

        let mut item = Self {
            product_id,
            product_name,
            unit_price,
            quantity,
            subtotal: None,
        };

        item.calculate_subtotal();

        Ok(item)
    }

    /// subtotal = quantity × unit_price, rounded to cents
    pub fn calculate_subtotal(&mut self) {
        let raw_subtotal = Decimal::from(self.quantity) * self.unit_price;
        self.subtotal = Some(round_cents(raw_subtotal));
    }

    /// Get the subtotal, calculating if not set
    pub fn get_subtotal(&mut self) -> Decimal {
        if self.subtotal.is_none() {
            self.calculate_subtotal();
        }
        self.subtotal.unwrap_or(Decimal::ZERO)
    }

    fn validate_product_name(product_name: &str) -> Result<()> {
        if product_name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if product_name.len() > 255 {
            return Err(AppError::validation(
                "Product name cannot exceed 255 characters",
            ));
        }

        Ok(())
    }

    fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }
}
