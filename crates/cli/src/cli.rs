use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Count syllables per line and preview editor annotations")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the user config directory)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the syllable count of every line
	Count(CountArgs),
	/// Run the annotation synchronizer against a file
	Annotate(AnnotateArgs),
}

#[derive(Args, Debug)]
pub struct CountArgs {
	/// File to read (stdin if omitted)
	pub file: Option<PathBuf>,

	/// Append a per-word breakdown to each line
	#[arg(long, conflicts_with = "total")]
	pub words: bool,

	/// Print only the document total
	#[arg(long)]
	pub total: bool,
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
	/// File to annotate
	pub file: PathBuf,

	/// First line shown in the simulated viewport
	#[arg(long, default_value_t = 0)]
	pub top: usize,

	/// Number of lines the simulated viewport shows
	#[arg(long, default_value_t = 40)]
	pub height: usize,

	/// Height of one rendered line, in layout units
	#[arg(long, default_value_t = 20.0)]
	pub line_height: f64,

	/// Keep running and re-annotate whenever the file changes
	#[arg(long)]
	pub watch: bool,

	/// Poll interval for --watch, in milliseconds
	#[arg(long, default_value_t = 250, requires = "watch")]
	pub poll_ms: u64,
}
