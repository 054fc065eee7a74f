use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use layout_migrate::batch::{BatchOptions, run_batch};
use layout_migrate::config::{Config, Preset, parse_config_file, render_config};
use layout_migrate::rules::RuleSet;

#[derive(Parser)]
#[command(name = "layout-migrate")]
#[command(
	author,
	version,
	about = "Batch regex rewriter for migrating page layout markup"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Enable debug logging (RUST_LOG takes precedence)
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Wire pages up to the collapsible sidebar hook
	AddSidebar(RunArgs),

	/// Move pages onto the --sidebar-width CSS variable and drop the hook
	RemoveSidebarVar(RunArgs),

	/// Run a rule set loaded from a TOML file
	Run {
		/// Path to the config file
		config: PathBuf,

		#[command(flatten)]
		args: RunArgs,
	},

	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Args)]
struct RunArgs {
	/// Directory the target files live in
	#[arg(long, value_name = "DIR")]
	base_dir: Option<PathBuf>,

	/// Report what would change without writing
	#[arg(long)]
	dry_run: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Print a built-in preset as TOML
	Show {
		#[arg(value_enum)]
		preset: PresetArg,
	},
	/// Check a config file for errors without touching any target
	Validate {
		/// Path to the config file
		config: PathBuf,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
	AddSidebar,
	RemoveSidebarVar,
}

impl From<PresetArg> for Preset {
	fn from(arg: PresetArg) -> Self {
		match arg {
			PresetArg::AddSidebar => Preset::AddSidebar,
			PresetArg::RemoveSidebarVar => Preset::RemoveSidebarVar,
		}
	}
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::AddSidebar(args) => handle_batch(Preset::AddSidebar.config(), &args),
		Commands::RemoveSidebarVar(args) => {
			handle_batch(Preset::RemoveSidebarVar.config(), &args)
		}
		Commands::Run { config, args } => {
			let loaded = parse_config_file(&config)
				.with_context(|| format!("Failed to load {}", config.display()))?;
			handle_batch(loaded, &args)
		}
		Commands::Config { action } => match action {
			ConfigAction::Show { preset } => handle_config_show(preset.into()),
			ConfigAction::Validate { config } => handle_config_validate(&config),
		},
	}
}

fn init_logging(verbose: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(filter)
		.with_target(false)
		.without_time()
		.init();
}

fn handle_batch(mut config: Config, args: &RunArgs) -> Result<ExitCode> {
	if let Some(ref base_dir) = args.base_dir {
		config.base_dir = base_dir.clone();
	}

	let rules = RuleSet::compile(&config.rules).context("Failed to compile rules")?;

	let options = BatchOptions {
		dry_run: args.dry_run,
	};

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	run_batch(&config, &rules, options, &mut out)
		.with_context(|| format!("Batch aborted in {}", config.base_dir.display()))?;

	// Skips and misses are reported above; they never fail the run.
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(preset: Preset) -> Result<ExitCode> {
	let rendered = render_config(&preset.config())
		.with_context(|| format!("Failed to render preset {}", preset.as_str()))?;
	println!("# Preset: {}", preset.as_str());
	print!("{rendered}");
	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(path: &Path) -> Result<ExitCode> {
	let result = parse_config_file(path).and_then(|config| {
		let rules = RuleSet::compile(&config.rules)?;
		Ok((config, rules))
	});

	match result {
		Ok((config, rules)) => {
			println!("Configuration is valid: {}", path.display());
			println!("  base-dir: {}", config.base_dir.display());
			println!("  targets: {}", config.targets.len());
			println!("  rules: {}", rules.len());
			for compiled in rules.iter() {
				let rule = &compiled.rule;
				let mut notes = Vec::new();
				if rule.fallback.is_some() {
					notes.push("fallback");
				}
				if rule.label.is_some() {
					notes.push("labelled");
				}
				if rule.unless_contains.is_some() {
					notes.push("guarded");
				}
				if notes.is_empty() {
					println!("    {}", rule.name);
				} else {
					println!("    {} ({})", rule.name, notes.join(", "));
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
