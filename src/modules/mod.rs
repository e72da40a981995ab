pub mod deletions;
pub mod health;
pub mod invoices;
pub mod taxes;
