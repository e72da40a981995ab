pub mod controllers;
pub mod models;
pub mod services;

pub use models::TaxLine;
pub use services::{JurisdictionTaxTable, TaxCalculator};
