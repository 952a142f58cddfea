//! Configuration management for the seating waitlist
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{
    parse_table_specs, validate_config, AppConfig, RestaurantSettings, ServiceSettings,
    TableSpec,
};
