pub mod deletable;

pub use deletable::{DeletableEntity, DeleteState, ResourceKind};
