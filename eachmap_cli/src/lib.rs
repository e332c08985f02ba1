use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand `@each-in-map` directives in stylesheets using tables from a JSON maps document.",
	long_about = "eachmap rewrites every `@each-in-map $key, $value in table` directive into a \
	              plain `@each` loop, with the keys and values of `table` read from a JSON maps \
	              document.\n\nQuick start:\n  eachmap expand styles.css   Print the expanded \
	              stylesheet\n  eachmap check styles/*.css  Verify every directive expands\n  \
	              eachmap tables              List the tables in the maps document"
)]
pub struct EachMapCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory the maps document path is resolved against. Also the
	/// directory searched for `eachmap.toml`. Defaults to the current
	/// directory.
	#[arg(long, global = true)]
	pub base_path: Option<PathBuf>,

	/// Path to the JSON maps document, relative to the base path unless
	/// absolute. Defaults to `maps.json`.
	#[arg(long, short, global = true)]
	pub maps: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Expand every `@each-in-map` directive in a stylesheet.
	///
	/// Reads the stylesheet from INPUT, or from stdin when INPUT is omitted
	/// or `-`. The expanded stylesheet is written to OUTPUT, or to stdout.
	/// Everything except the directives themselves is printed back exactly
	/// as it was read.
	Expand {
		/// The stylesheet to expand.
		input: Option<PathBuf>,

		/// Write the expanded stylesheet here instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Check that every directive in the given stylesheets expands.
	///
	/// Each file is expanded in memory and nothing is written. Exits with a
	/// non-zero status code if any file fails to parse or refers to a
	/// missing table. Use `--diff` to see what each expansion changes.
	Check {
		/// The stylesheets to check.
		#[arg(required = true)]
		inputs: Vec<PathBuf>,

		/// Show a unified diff between each stylesheet and its expansion.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// List the tables in the maps document.
	///
	/// Prints every table name with its entry count, in document order.
	Tables {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = TablesOutputFormat::Text)]
		format: TablesOutputFormat,
	},
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TablesOutputFormat {
	#[default]
	Text,
	Json,
}
