//! Configuration and file locations for diff-preview
//!
//! This crate provides:
//! - Platform directories for cache files (log output)
//! - Configuration file lookup (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{load_config_file, CONFIG_FILE};
pub use paths::cache_dir;
