//! Vetshop checkout library
//!
//! Tax computation and invoice assembly for the clinic shop's checkout flow,
//! plus the soft-delete-with-undo machinery used by the catalog list views.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::deletions;
pub use modules::invoices;
pub use modules::taxes;
