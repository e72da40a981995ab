pub mod tax_calculator;
pub mod tax_table;

pub use tax_calculator::TaxCalculator;
pub use tax_table::JurisdictionTaxTable;
