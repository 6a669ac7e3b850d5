pub mod base_controller;

pub use base_controller::{crud_routes, AppState};
