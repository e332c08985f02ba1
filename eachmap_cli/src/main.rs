use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use eachmap_cli::Commands;
use eachmap_cli::EachMapCli;
use eachmap_cli::TablesOutputFormat;
use eachmap_core::EachInMap;
use eachmap_core::EachInMapConfig;
use eachmap_core::EachInMapError;
use eachmap_core::EachInMapOptions;
use eachmap_core::Tables;
use miette::NamedSource;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

/// Name shown for stylesheets read from stdin.
const STDIN_NAME: &str = "<stdin>";

fn main() {
	let args = EachMapCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Expand { input, output }) => {
			run_expand(&args, input.as_deref(), output.as_deref())
		}
		Some(Commands::Check { inputs, diff }) => run_check(&args, inputs, *diff),
		Some(Commands::Tables { format }) => run_tables(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `eachmap --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<EachInMapError>() {
			Ok(error) => {
				let report: miette::Report = (*error).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `--verbose` turns on debug events, otherwise `RUST_LOG`
/// applies with a `warn` fallback.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &EachMapCli) -> PathBuf {
	args.base_path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Combine command line flags, `eachmap.toml` and the defaults.
fn resolve_options(args: &EachMapCli) -> Result<EachInMapOptions, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = EachInMapConfig::load(&root)?;
	let options = EachInMapOptions::from_layers(args.base_path.clone(), args.maps.clone(), config);

	tracing::debug!(
		base_path = %options.base_path.display(),
		json_path = %options.json_path.display(),
		"resolved options"
	);

	Ok(options)
}

fn read_input(input: Option<&Path>) -> std::io::Result<(String, String)> {
	match input {
		Some(path) if path != Path::new("-") => {
			let source = std::fs::read_to_string(path)?;
			Ok((path.display().to_string(), source))
		}
		_ => {
			let mut source = String::new();
			std::io::stdin().read_to_string(&mut source)?;
			Ok((STDIN_NAME.to_string(), source))
		}
	}
}

/// Attach the stylesheet to a directive error so the label points into it.
fn source_report(error: EachInMapError, name: &str, source: &str) -> miette::Report {
	if error.span().is_some() {
		miette::Report::new(error).with_source_code(NamedSource::new(name, source.to_string()))
	} else {
		miette::Report::new(error)
	}
}

fn run_expand(
	args: &EachMapCli,
	input: Option<&Path>,
	output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let processor = EachInMap::new(resolve_options(args)?);
	let (name, source) = read_input(input)?;

	let expanded = match processor.process(&source) {
		Ok(expanded) => expanded,
		Err(error) => {
			eprintln!("{:?}", source_report(error, &name, &source));
			process::exit(2);
		}
	};

	match output {
		Some(path) => {
			std::fs::write(path, &expanded)?;
			if args.verbose {
				eprintln!("Wrote {}", path.display());
			}
		}
		None => print!("{expanded}"),
	}

	Ok(())
}

fn run_check(
	args: &EachMapCli,
	inputs: &[PathBuf],
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args)?;
	let tables = options.load_tables()?;
	let mut failures = 0;
	let mut changed = 0;

	for input in inputs {
		let name = input.display().to_string();
		let source = match std::fs::read_to_string(input) {
			Ok(source) => source,
			Err(e) => {
				eprintln!("{} {name}: {e}", colored!("error:", red));
				failures += 1;
				continue;
			}
		};

		match eachmap_core::process(&source, &tables) {
			Ok(expanded) => {
				if expanded != source {
					changed += 1;
				}

				if args.verbose {
					println!("{} {name}", colored!("ok", green));
				}

				if show_diff && expanded != source {
					eprintln!("{}", colored!(format!("--- {name}"), bold));
					print_diff(&source, &expanded);
				}
			}
			Err(error) => {
				eprintln!("{:?}", source_report(error, &name, &source));
				failures += 1;
			}
		}
	}

	if failures > 0 {
		eprintln!(
			"\n{} {failures} of {} file(s) could not be expanded.",
			colored!("Check failed:", red),
			inputs.len()
		);
		process::exit(1);
	}

	println!(
		"Check passed: {} file(s) expanded cleanly ({changed} with directives).",
		inputs.len()
	);

	Ok(())
}

#[derive(Serialize)]
struct TablesReport<'a> {
	path: String,
	tables: Vec<TableSummary<'a>>,
}

#[derive(Serialize)]
struct TableSummary<'a> {
	name: &'a str,
	entries: usize,
}

fn summarize(tables: &Tables) -> Vec<TableSummary<'_>> {
	tables
		.iter()
		.map(|(name, table)| {
			TableSummary {
				name: name.as_str(),
				entries: table.len(),
			}
		})
		.collect()
}

fn run_tables(
	args: &EachMapCli,
	format: TablesOutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args)?;
	let path = options.resolved_json_path();
	let tables = options.load_tables()?;

	match format {
		TablesOutputFormat::Json => {
			let report = TablesReport {
				path: path.display().to_string(),
				tables: summarize(&tables),
			};
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		TablesOutputFormat::Text => {
			if tables.is_empty() {
				println!("No tables found in {}.", path.display());
				return Ok(());
			}

			println!("{}", colored!(format!("Tables in {}:", path.display()), bold));
			for summary in summarize(&tables) {
				let noun = if summary.entries == 1 {
					"entry"
				} else {
					"entries"
				};
				println!("  {} ({} {noun})", summary.name, summary.entries);
			}
		}
	}

	Ok(())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
	if !expected.ends_with('\n') {
		eprintln!();
	}
}
