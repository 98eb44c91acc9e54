//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename derivation and validation

pub mod naming;
pub mod paths;

pub use naming::{derive_filename, partial_filename, sanitize_filename, sanitize_path_component};
pub use paths::{ensure_dir, get_log_dir, get_profile_folder, log_filename};
