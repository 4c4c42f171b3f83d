//! `fave`: load a plugin, construct one library entry by name and print its label.

mod cli;
mod config;
mod failure;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use config::FaveConfig;
use failure::{EXIT_USAGE, Failure};
use fave_library::plugin::load_plugin;
use fave_library::{EntryContext, LIBRARY_ENTRIES};
use tracing::{debug, info};

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => {
			let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
			let _ = err.print();
			return ExitCode::from(code);
		}
	};

	setup_tracing(cli.verbose);

	match run(&cli) {
		Ok(label) => {
			println!("{label}");
			ExitCode::SUCCESS
		}
		Err(failure) => {
			eprintln!("error: {failure}");
			ExitCode::from(failure.exit_code())
		}
	}
}

fn run(cli: &Cli) -> Result<String, Failure> {
	if cli.key.trim().is_empty() {
		return Err(Failure::Usage("entry key is empty".to_string()));
	}

	let config = FaveConfig::load(cli.config.as_deref()).map_err(Failure::Config)?;
	let library_name = cli.library.clone().unwrap_or_else(|| config.library.name.clone());
	LIBRARY_ENTRIES.factory().set_policy(config.plugins.duplicates);

	if let Some(path) = cli.plugin_path() {
		let report = load_plugin(path, &config.load_options())?;
		for key in &report.refused {
			info!(%key, plugin = %report.name, "kept existing entry");
		}
	}

	let entry = LIBRARY_ENTRIES
		.make(&cli.key, EntryContext::new(library_name))
		.map_err(|source| Failure::Construct {
			key: cli.key.clone(),
			source,
		})?
		.ok_or_else(|| {
			debug!(known = ?LIBRARY_ENTRIES.factory().keys(), "unknown entry");
			Failure::UnknownKey { key: cli.key.clone() }
		})?;

	LIBRARY_ENTRIES.apply(|made| debug!(entry = %made.name(), "warehoused"));
	Ok(entry.name())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("FAVE_LOG")
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
