//! The lex binary: judges asset corpora against declarative law.

mod cli;
mod commands;
mod report;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let clean = commands::run(&cli)?;
	Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	// LEX_LOG overrides the verbosity flag
	let filter = EnvFilter::try_from_env("LEX_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("lex=debug,lex_tribunal=debug,lex_law=debug,lex_cache=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
