pub mod controllers;
pub mod models;
pub mod services;

pub use models::{Invoice, InvoiceItem};
pub use services::InvoiceService;
