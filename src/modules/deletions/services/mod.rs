pub mod gateway;
pub mod soft_delete;

pub use gateway::{DeleteError, DeleteGateway, HttpDeleteGateway};
pub use soft_delete::SoftDeleteList;
