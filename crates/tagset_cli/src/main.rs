#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "tagset", about = "Typed settings document tools")]
struct Cli {
	/// More log output on stderr; repeat for more.
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
	/// Only log errors.
	#[arg(short, long, global = true, conflicts_with = "verbose")]
	quiet: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Parse a settings document and print its entries.
	Inspect(cmd::inspect::Args),
	/// Load the sample catalog from a document, report, and save it back.
	Demo(cmd::demo::Args),
	/// Validate and store one value of the sample catalog.
	Set(cmd::set::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> tagset::settings::Result<()> {
	match command {
		Commands::Inspect(args) => cmd::inspect::run(args),
		Commands::Demo(args) => cmd::demo::run(args),
		Commands::Set(args) => cmd::set::run(args),
	}
}

fn init_logging(verbose: u8, quiet: bool) {
	let level = match (quiet, verbose) {
		(true, _) => "error",
		(false, 0) => "warn",
		(false, 1) => "info",
		(false, 2) => "debug",
		(false, _) => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init()
		.ok();
}
