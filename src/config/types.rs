use crate::error::MigrateError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Directory target files are resolved against when a config doesn't say otherwise.
pub const DEFAULT_BASE_DIR: &str = "src/pages";

/// Summary line printed after the batch when a config doesn't provide one.
pub const DEFAULT_SUMMARY: &str = "Batch update complete!";

fn default_base_dir() -> PathBuf {
	PathBuf::from(DEFAULT_BASE_DIR)
}

/// A complete batch description: where to look, which files, and what to do to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// Directory every target name is joined onto.
	#[serde(default = "default_base_dir")]
	pub base_dir: PathBuf,

	/// File names to process, in order.
	pub targets: Vec<String>,

	/// Line printed once every target has been handled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,

	/// Substitution rules, applied in order to each file's text.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// A single pattern/replacement pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rule {
	/// Identifier used in logs and per-rule reports.
	pub name: String,

	/// Strict regex describing the exact expected prior shape.
	pub pattern: String,

	/// Replacement template. `$1`/`${name}` expand captures, `$$` is a literal dollar.
	pub replacement: String,

	/// Looser regex tried only when `pattern` matches nothing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fallback: Option<String>,

	/// Marks the rule as worth diagnosing. A miss prints `No <label> match found in <file>`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,

	/// Skip the rule when the text already contains this literal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unless_contains: Option<String>,
}

impl Rule {
	/// Check the fields that regex compilation can't catch.
	pub fn validate(&self) -> Result<(), MigrateError> {
		if self.name.trim().is_empty() {
			return Err(MigrateError::InvalidRule {
				rule: "<unnamed>".to_string(),
				reason: "name must not be empty".to_string(),
			});
		}

		if self.pattern.is_empty() {
			return Err(MigrateError::InvalidRule {
				rule: self.name.clone(),
				reason: "pattern must not be empty".to_string(),
			});
		}

		if self.fallback.as_deref() == Some("") {
			return Err(MigrateError::InvalidRule {
				rule: self.name.clone(),
				reason: "fallback must not be empty when set".to_string(),
			});
		}

		Ok(())
	}
}

impl Config {
	/// Validate targets and every rule, and reject duplicate rule names.
	pub fn validate(&self) -> Result<(), MigrateError> {
		if self.targets.is_empty() {
			return Err(MigrateError::EmptyTargets);
		}

		let mut seen = HashSet::new();
		for rule in &self.rules {
			rule.validate()?;
			if !seen.insert(rule.name.as_str()) {
				return Err(MigrateError::DuplicateRule {
					rule: rule.name.clone(),
				});
			}
		}

		Ok(())
	}

	/// The summary line to print, falling back to the default.
	pub fn summary_line(&self) -> &str {
		self.summary.as_deref().unwrap_or(DEFAULT_SUMMARY)
	}
}
