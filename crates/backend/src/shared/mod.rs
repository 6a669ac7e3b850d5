pub mod base_service;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
