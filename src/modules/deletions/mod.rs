pub mod controllers;
pub mod models;
pub mod services;

pub use models::{DeletableEntity, DeleteState, ResourceKind};
pub use services::{DeleteError, DeleteGateway, HttpDeleteGateway, SoftDeleteList};
