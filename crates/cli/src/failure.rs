use fave_factory::MakeError;
use fave_factory::plugin::PluginError;

/// Process exit status for usage errors, as in `sysexits.h`.
pub const EXIT_USAGE: u8 = 64;

/// Everything that can stop a run, each mapped to its own exit status.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
	#[error("{0}")]
	Usage(String),
	#[error("no library entry is registered as '{key}'")]
	UnknownKey { key: String },
	#[error(transparent)]
	Plugin(#[from] PluginError),
	#[error("failed to construct '{key}': {source}")]
	Construct { key: String, source: MakeError },
	#[error("{0:#}")]
	Config(anyhow::Error),
}

impl Failure {
	pub fn exit_code(&self) -> u8 {
		match self {
			Self::UnknownKey { .. } => 1,
			Self::Plugin(PluginError::Open { .. }) => 2,
			Self::Plugin(PluginError::Symbol { .. } | PluginError::Incompatible { .. }) => 3,
			Self::Construct { .. } => 4,
			Self::Plugin(PluginError::EntryFailed { .. }) => 5,
			Self::Config(_) => 6,
			Self::Usage(_) => EXIT_USAGE,
		}
	}
}

#[cfg(test)]
mod tests;
