//! Batch driver for layout-migrate.
//!
//! Walks the configured targets in order, runs the rewriter over each existing file and writes
//! it back only when the text changed. Missing files and pattern misses are reported, never
//! raised; only I/O failures abort the batch.

use crate::config::types::Config;
use crate::error::{MigrateError, Result};
use crate::rules::{RuleReport, TextRewriter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Knobs for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
	/// Report what would change without writing anything.
	pub dry_run: bool,
}

/// Terminal state of one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
	/// The file doesn't exist under the base directory.
	Skipped,

	/// The text changed and was written (or would be, on a dry run).
	Updated,

	/// Every rule ran and the text is byte-identical.
	Unchanged,

	/// A labelled rule missed on all its patterns. Other rules still ran; `changed` says
	/// whether they altered the text. Takes precedence over `Unchanged`, so a file where
	/// nothing matched at all is `PartialMatch { changed: false }` even though the console
	/// line reads `No changes made to <name>`.
	PartialMatch { changed: bool },
}

impl FileOutcome {
	/// Whether the file's text differs from what was read.
	pub fn changed(&self) -> bool {
		matches!(
			self,
			FileOutcome::Updated | FileOutcome::PartialMatch { changed: true }
		)
	}
}

/// Everything known about one target after the batch.
#[derive(Debug, Clone)]
pub struct FileReport {
	pub name: String,
	pub path: PathBuf,
	pub outcome: FileOutcome,

	/// Per-rule outcomes; empty for skipped files.
	pub rules: Vec<RuleReport>,
}

impl FileReport {
	/// Names of the labelled rules that missed on every pattern.
	pub fn missed_rules(&self) -> Vec<&str> {
		self.rules
			.iter()
			.filter(|r| r.gave_up())
			.map(|r| r.name.as_str())
			.collect()
	}
}

/// Per-file reports, in target order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
	pub files: Vec<FileReport>,
}

impl BatchSummary {
	pub fn skipped(&self) -> usize {
		self.count(|o| *o == FileOutcome::Skipped)
	}

	/// Files whose text changed, including partial matches that changed.
	pub fn updated(&self) -> usize {
		self.count(FileOutcome::changed)
	}

	pub fn unchanged(&self) -> usize {
		self.count(|o| *o == FileOutcome::Unchanged)
	}

	pub fn partial(&self) -> usize {
		self.count(|o| matches!(o, FileOutcome::PartialMatch { .. }))
	}

	/// No skips and no partial matches: every target was found and every labelled rule hit.
	pub fn is_complete(&self) -> bool {
		self.skipped() == 0 && self.partial() == 0
	}

	pub fn outcome_of(&self, name: &str) -> Option<FileOutcome> {
		self.files.iter().find(|f| f.name == name).map(|f| f.outcome)
	}

	fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
		self.files.iter().filter(|f| pred(&f.outcome)).count()
	}
}

/// Run every target in `config` through `rewriter`, writing status lines to `out`.
pub fn run_batch<W: Write>(
	config: &Config,
	rewriter: &dyn TextRewriter,
	options: BatchOptions,
	out: &mut W,
) -> Result<BatchSummary> {
	info!(
		base_dir = %config.base_dir.display(),
		targets = config.targets.len(),
		dry_run = options.dry_run,
		"starting batch"
	);

	let mut summary = BatchSummary::default();

	for name in &config.targets {
		let path = config.base_dir.join(name);
		let report = process_file(name, &path, rewriter, options, out)?;
		summary.files.push(report);
	}

	writeln!(out).map_err(output_error)?;
	writeln!(out, "{}", config.summary_line()).map_err(output_error)?;

	info!(
		updated = summary.updated(),
		unchanged = summary.unchanged(),
		skipped = summary.skipped(),
		partial = summary.partial(),
		"batch finished"
	);

	Ok(summary)
}

/// Handle a single target: skip, rewrite, and persist if changed.
pub fn process_file<W: Write>(
	name: &str,
	path: &Path,
	rewriter: &dyn TextRewriter,
	options: BatchOptions,
	out: &mut W,
) -> Result<FileReport> {
	if !path.exists() {
		writeln!(out, "Skipping {name} - file not found").map_err(output_error)?;
		return Ok(FileReport {
			name: name.to_string(),
			path: path.to_path_buf(),
			outcome: FileOutcome::Skipped,
			rules: Vec::new(),
		});
	}

	let raw = std::fs::read_to_string(path).map_err(|source| MigrateError::FileRead {
		path: path.to_path_buf(),
		source,
	})?;

	// Rules are written against `\n`; CRLF files are rewritten in LF and restored on write.
	let crlf = raw.contains("\r\n");
	let original = if crlf {
		raw.replace("\r\n", "\n")
	} else {
		raw
	};

	let rewrite = rewriter.rewrite(&original);

	let mut gave_up = false;
	for report in &rewrite.rules {
		if let Some(label) = report.label.as_deref()
			&& report.strict_missed()
		{
			writeln!(out, "No {label} match found in {name}").map_err(output_error)?;
		}
		if report.fallback_missed() {
			debug!(file = name, rule = %report.name, label = ?report.label, "fallback missed");
			writeln!(out, "Still no match for {name}").map_err(output_error)?;
		}
		gave_up |= report.gave_up();
	}

	let changed = rewrite.text != original;

	if changed {
		if options.dry_run {
			writeln!(out, "Would update {name}").map_err(output_error)?;
		} else {
			let contents = if crlf {
				rewrite.text.replace('\n', "\r\n")
			} else {
				rewrite.text.clone()
			};
			std::fs::write(path, &contents).map_err(|source| MigrateError::FileWrite {
				path: path.to_path_buf(),
				source,
			})?;
			debug!(path = %path.display(), bytes = contents.len(), crlf, "wrote file");
			writeln!(out, "Updated {name}").map_err(output_error)?;
		}
	} else {
		writeln!(out, "No changes made to {name}").map_err(output_error)?;
	}

	let outcome = match (gave_up, changed) {
		(true, changed) => FileOutcome::PartialMatch { changed },
		(false, true) => FileOutcome::Updated,
		(false, false) => FileOutcome::Unchanged,
	};

	Ok(FileReport {
		name: name.to_string(),
		path: path.to_path_buf(),
		outcome,
		rules: rewrite.rules,
	})
}

fn output_error(source: std::io::Error) -> MigrateError {
	MigrateError::Output { source }
}
