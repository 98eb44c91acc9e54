//! Configuration module.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, NetworkConfig, OptionsConfig, TargetConfig};
pub use validation::{
    normalize_profile, parse_profile_list, validate_concurrency, validate_config,
    validate_profiles,
};
