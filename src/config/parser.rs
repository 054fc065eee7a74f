use crate::config::types::Config;
use crate::error::{MigrateError, Result};
use std::path::Path;

/// Parse a config file from the given path.
///
/// A relative `base-dir` is resolved against the directory holding the config file, so a
/// config checked into a project works regardless of where the tool is invoked from.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| MigrateError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let mut config = parse_config_str(&content, path)?;

	if config.base_dir.is_relative()
		&& let Some(parent) = path.parent()
	{
		config.base_dir = parent.join(&config.base_dir);
	}

	Ok(config)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| MigrateError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

/// Render a config as TOML, in the same shape `parse_config_str` accepts.
pub fn render_config(config: &Config) -> Result<String> {
	toml::to_string(config).map_err(|source| MigrateError::ConfigSerializeError { source })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_minimal_config() {
		let content = r#"
targets = ["Dashboard.tsx"]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.base_dir, PathBuf::from("src/pages"));
		assert_eq!(config.targets, vec!["Dashboard.tsx".to_string()]);
		assert!(config.summary.is_none());
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
base-dir = "app/pages"
targets = ["A.tsx", "B.tsx"]
summary = "Done!"

[[rules]]
name = "main"
pattern = 'ml-64'
replacement = 'ml-72'
fallback = 'ml-\d+'
label = "main tag"

[[rules]]
name = "import"
pattern = "(import .*)"
replacement = "$1;"
unless_contains = "useThing"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.base_dir, PathBuf::from("app/pages"));
		assert_eq!(config.summary_line(), "Done!");
		assert_eq!(config.rules.len(), 2);

		let main = &config.rules[0];
		assert_eq!(main.fallback.as_deref(), Some(r"ml-\d+"));
		assert_eq!(main.label.as_deref(), Some("main tag"));
		assert!(main.unless_contains.is_none());

		let import = &config.rules[1];
		assert_eq!(import.replacement, "$1;");
		assert_eq!(import.unless_contains.as_deref(), Some("useThing"));
	}

	#[test]
	fn test_missing_targets_is_parse_error() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("base-dir = \"x\"\n", &path);
		assert!(matches!(
			result,
			Err(MigrateError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_empty_targets_is_validation_error() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("targets = []\n", &path);
		assert!(matches!(result, Err(MigrateError::EmptyTargets)));
	}

	#[test]
	fn test_relative_base_dir_resolves_against_config_dir() {
		let temp_dir = tempfile::tempdir().unwrap();
		let config_path = temp_dir.path().join("migrate.toml");
		std::fs::write(
			&config_path,
			"base-dir = \"pages\"\ntargets = [\"A.tsx\"]\n",
		)
		.unwrap();

		let config = parse_config_file(&config_path).unwrap();
		assert_eq!(config.base_dir, temp_dir.path().join("pages"));
	}

	#[test]
	fn test_missing_file_is_read_error() {
		let result = parse_config_file(Path::new("/nonexistent/migrate.toml"));
		assert!(matches!(result, Err(MigrateError::ConfigReadError { .. })));
	}

	#[test]
	fn test_render_then_parse_preserves_rules() {
		let config = crate::config::presets::Preset::RemoveSidebarVar.config();
		let rendered = render_config(&config).unwrap();
		let parsed = parse_config_str(&rendered, Path::new("rendered.toml")).unwrap();

		assert_eq!(parsed.targets, config.targets);
		assert_eq!(parsed.rules, config.rules);
		assert_eq!(parsed.summary, config.summary);
	}
}
