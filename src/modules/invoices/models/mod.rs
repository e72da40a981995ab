pub mod invoice;
pub mod line_item;

pub use invoice::Invoice;
pub use line_item::InvoiceItem;
