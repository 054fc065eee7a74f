use std::path::PathBuf;

/// Library-level structured errors for layout-migrate.
///
/// Anticipated per-file conditions (missing file, pattern miss) are not errors; they are
/// reported as outcomes. Everything here aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to serialize config")]
	ConfigSerializeError {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Invalid regex pattern in rule {rule}: {pattern}")]
	InvalidRegex {
		rule: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Config must list at least one target file")]
	EmptyTargets,

	#[error("Invalid rule {rule}: {reason}")]
	InvalidRule { rule: String, reason: String },

	#[error("Duplicate rule name: {rule}")]
	DuplicateRule { rule: String },

	#[error("Failed to read target file: {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write target file: {path}")]
	FileWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write status output")]
	Output {
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using MigrateError.
pub type Result<T> = std::result::Result<T, MigrateError>;
