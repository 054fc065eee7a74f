//! Configuration for layout-migrate.
//!
//! This module handles:
//! - TOML config file parsing and rendering
//! - Config validation
//! - The built-in presets

pub mod parser;
pub mod presets;
pub mod types;

pub use parser::{parse_config_file, parse_config_str, render_config};
pub use presets::Preset;
pub use types::{Config, DEFAULT_BASE_DIR, DEFAULT_SUMMARY, Rule};
