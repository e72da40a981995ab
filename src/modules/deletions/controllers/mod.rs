pub mod deletion_controller;

pub use deletion_controller::configure_deletion_routes;
