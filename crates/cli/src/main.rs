//! `cadence`: syllable counts on the command line.
//!
//! `count` prints per-line estimates. `annotate` drives the annotation
//! synchronizer against a file with a simulated viewport, printing every
//! annotation batch the synchronizer emits.

mod cli;
mod count;
mod host;
mod settings;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cadence_annotate::{AnnotationSink, EditorHost, SyncConfig, Synchronizer};
use cadence_worker::Spawner;
use clap::Parser;
use cli::{AnnotateArgs, Cli, Command, CountArgs};
use host::{FileHost, WriterSink};
use tracing::info;

/// Upper bound on waiting for a one-shot pass.
const PASS_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Count(args) => run_count(args),
		Command::Annotate(args) => {
			let config = settings::load(cli.config.as_deref())?;
			run_annotate(args, config).await
		}
	}
}

fn run_count(args: CountArgs) -> anyhow::Result<()> {
	let text = match &args.file {
		Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
		None => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
			text
		}
	};

	if args.total {
		println!("{}", count::total(&text));
	} else {
		print!("{}", count::report(&text, args.words));
	}
	Ok(())
}

async fn run_annotate(args: AnnotateArgs, config: SyncConfig) -> anyhow::Result<()> {
	anyhow::ensure!(args.line_height > 0.0, "--line-height must be positive");
	anyhow::ensure!(args.file.is_file(), "{} is not a readable file", args.file.display());

	let spawner = Spawner::current().context("no async runtime")?;
	let host = FileHost::new(args.file.clone(), args.line_height, args.top, args.height);
	let sink = Arc::new(WriterSink::new(std::io::stdout()));
	let sync = Synchronizer::new(spawner, host, Arc::clone(&sink), config);

	sync.request_pass();
	wait_for_pass(&sync).await?;

	if args.watch {
		info!(path = %args.file.display(), poll_ms = args.poll_ms, "cli.annotate.watching");
		sync.observe(Duration::from_millis(args.poll_ms));
		tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
	}

	sync.shutdown();
	Ok(())
}

/// Waits until the first pass has finished one way or another.
async fn wait_for_pass<H: EditorHost, S: AnnotationSink>(sync: &Synchronizer<H, S>) -> anyhow::Result<()> {
	let mut progress = sync.subscribe();
	let stats = tokio::time::timeout(PASS_TIMEOUT, progress.wait_for(|stats| stats.settled() > 0))
		.await
		.context("annotation pass timed out")?
		.map(|stats| *stats)
		.context("synchronizer went away")?;
	anyhow::ensure!(stats.render_failures == 0, "writing annotations failed");
	Ok(())
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
	if verbose {
		"cadence=debug,cadence_annotate=debug,cadence_worker=debug,info"
	} else {
		"info"
	}
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
	};

	// CADENCE_LOG_DIR sends logs to a per-process file instead of stderr.
	if let Some(log_dir) = std::env::var("CADENCE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("cadence.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "cli.tracing.file");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
