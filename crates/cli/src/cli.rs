use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fave")]
#[command(about = "Print the label of a library entry, optionally loading a plugin first")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to `$FAVE_CONFIG_DIR/config.toml`, then the user config dir)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Library name passed to entry constructors (overrides `library.name`)
	#[arg(long, value_name = "NAME")]
	pub library: Option<String>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	/// Plugin shared library to load, or `-` for linked-in entries only
	#[arg(value_name = "PLUGIN")]
	pub plugin: PathBuf,

	/// Entry to construct, e.g. `Book` or `Atlas`
	#[arg(value_name = "KEY")]
	pub key: String,
}

impl Cli {
	/// Plugin to load, or `None` for `-`.
	pub fn plugin_path(&self) -> Option<&std::path::Path> {
		(self.plugin.as_os_str() != "-").then_some(self.plugin.as_path())
	}
}
