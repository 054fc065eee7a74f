//! layout-migrate - batch regex rewriter for page layout markup.
//!
//! This library provides the core functionality for layout-migrate, including:
//! - Batch configuration (TOML files and built-in presets)
//! - Rule compilation with strict and fallback patterns
//! - Ordered text rewriting behind the `TextRewriter` trait
//! - The batch driver and its per-file outcomes
//!
//! # Example
//!
//! ```no_run
//! use layout_migrate::batch::{BatchOptions, run_batch};
//! use layout_migrate::config::Preset;
//! use layout_migrate::rules::RuleSet;
//!
//! let mut config = Preset::RemoveSidebarVar.config();
//! config.base_dir = "frontend/src/pages".into();
//! let rules = RuleSet::compile(&config.rules).unwrap();
//!
//! let summary = run_batch(&config, &rules, BatchOptions::default(), &mut std::io::stdout()).unwrap();
//! println!("{} files updated", summary.updated());
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod rules;

pub use error::{MigrateError, Result};
