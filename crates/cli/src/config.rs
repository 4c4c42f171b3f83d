//! `config.toml` loading.
//!
//! Looked up in order:
//!
//! 1. `--config <PATH>` (must exist)
//! 2. `$FAVE_CONFIG_DIR/config.toml`
//! 3. `<user config dir>/fave/config.toml`
//!
//! A missing file at 2 or 3 means defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fave_factory::DuplicatePolicy;
use fave_library::plugin::LoadOptions;
use serde::Deserialize;
use tracing::debug;

/// Environment variable naming the directory holding `config.toml`.
pub const CONFIG_DIR_ENV: &str = "FAVE_CONFIG_DIR";

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaveConfig {
	pub library: LibraryConfig,
	pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
	/// Library name handed to every entry constructor.
	pub name: String,
}

impl Default for LibraryConfig {
	fn default() -> Self {
		Self {
			name: "Metro Library".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsConfig {
	/// Symbol resolved as the plugin entry point.
	pub entry_symbol: String,
	/// How plugin declarations colliding with existing keys are treated.
	pub duplicates: DuplicatePolicy,
}

impl Default for PluginsConfig {
	fn default() -> Self {
		Self {
			entry_symbol: LoadOptions::default().entry_symbol,
			duplicates: DuplicatePolicy::default(),
		}
	}
}

impl FaveConfig {
	pub fn parse(src: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(src)?)
	}

	/// Finds and reads the config file, see the module docs for the search order.
	pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
		let Some(path) = config_path(explicit) else {
			debug!("no config directory; using defaults");
			return Ok(Self::default());
		};

		let src = match std::fs::read_to_string(&path) {
			Ok(src) => src,
			Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
				debug!(path = %path.display(), "no config file; using defaults");
				return Ok(Self::default());
			}
			Err(err) => {
				return Err(err).with_context(|| format!("failed to read config file {}", path.display()));
			}
		};

		debug!(path = %path.display(), "loading config");
		Self::parse(&src).with_context(|| format!("invalid config file {}", path.display()))
	}

	pub fn load_options(&self) -> LoadOptions {
		LoadOptions {
			entry_symbol: self.plugins.entry_symbol.clone(),
		}
	}
}

/// Path the config is read from, if any location applies.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
	if let Some(path) = explicit {
		return Some(path.to_path_buf());
	}
	if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
		return Some(PathBuf::from(dir).join(CONFIG_FILE));
	}
	dirs::config_dir().map(|dir| dir.join("fave").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests;
