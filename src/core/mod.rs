pub mod error;
pub mod money;
pub mod notify;

pub use error::{AppError, Result};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
