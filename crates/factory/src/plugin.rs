//! Opening plugin units and resolving their entry points.
//!
//! This module only knows about shared libraries and symbols. What an entry point is
//! called with, and how its declarations reach a registry, is up to the interface crate
//! that defines the plugin ABI.
//!
//! Units are never unloaded: [`PluginLoader`] keeps each one for the life of the process,
//! and makers declared by a unit should capture its `Arc` so no object outlives its code.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use parking_lot::Mutex;
use tracing::{debug, info};

/// Errors from loading foreign code.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
	/// The platform loader could not open or link the unit.
	#[error("failed to load '{}': {source}", path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},
	/// The unit opened but does not export the requested symbol.
	#[error("failed to load symbol '{symbol}' from '{}': {source}", path.display())]
	Symbol {
		path: PathBuf,
		symbol: String,
		#[source]
		source: libloading::Error,
	},
	/// The entry point reported an ABI version or layout the host does not speak.
	#[error("plugin '{}' is incompatible: expected ABI {expected}, found {found}", path.display())]
	Incompatible { path: PathBuf, expected: u32, found: u32 },
	/// The entry point ran and reported failure.
	#[error("entry point of '{}' failed: {reason}", path.display())]
	EntryFailed { path: PathBuf, reason: String },
}

impl PluginError {
	/// Path of the unit the error refers to.
	pub fn path(&self) -> &Path {
		match self {
			Self::Open { path, .. }
			| Self::Symbol { path, .. }
			| Self::Incompatible { path, .. }
			| Self::EntryFailed { path, .. } => path,
		}
	}
}

/// An opened shared library.
pub struct PluginUnit {
	path: PathBuf,
	lib: Library,
}

impl PluginUnit {
	/// Opens the unit at `path`, running its load-time initializers.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, PluginError> {
		let path = path.as_ref().to_path_buf();
		// SAFETY: opening a library runs its initializers; loading a unit is an explicit request
		// to trust its code.
		let lib = unsafe { Library::new(&path) }.map_err(|source| PluginError::Open {
			path: path.clone(),
			source,
		})?;
		debug!(path = %path.display(), "opened plugin unit");
		Ok(Self { path, lib })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Resolves `symbol` as a value of type `T`, typically an `extern "C"` function pointer.
	///
	/// # Safety
	///
	/// `T` must be the exact type of the exported symbol. The returned value must not be used
	/// after this unit is dropped.
	pub unsafe fn symbol<T: Copy>(&self, symbol: &str) -> Result<T, PluginError> {
		let mut name = Vec::with_capacity(symbol.len() + 1);
		name.extend_from_slice(symbol.as_bytes());
		name.push(0);
		// SAFETY: forwarded to the caller.
		let sym = unsafe { self.lib.get::<T>(&name) }.map_err(|source| PluginError::Symbol {
			path: self.path.clone(),
			symbol: symbol.to_string(),
			source,
		})?;
		Ok(*sym)
	}
}

impl std::fmt::Debug for PluginUnit {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PluginUnit").field("path", &self.path).finish()
	}
}

/// Keeps every loaded unit alive for the rest of the process.
#[derive(Debug, Default)]
pub struct PluginLoader {
	units: Mutex<Vec<Arc<PluginUnit>>>,
}

impl PluginLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens `path` without retaining it yet.
	///
	/// Call [`PluginLoader::retain`] once the unit's entry point has succeeded.
	pub fn open(&self, path: impl AsRef<Path>) -> Result<Arc<PluginUnit>, PluginError> {
		PluginUnit::open(path).map(Arc::new)
	}

	/// Keeps `unit` loaded for the life of the process.
	pub fn retain(&self, unit: Arc<PluginUnit>) {
		info!(path = %unit.path().display(), "plugin unit loaded");
		self.units.lock().push(unit);
	}

	/// Paths of every retained unit, in load order.
	pub fn units(&self) -> Vec<PathBuf> {
		self.units.lock().iter().map(|u| u.path.clone()).collect()
	}

	/// Returns the retained unit loaded from `path`, if any.
	pub fn find(&self, path: &Path) -> Option<Arc<PluginUnit>> {
		self.units.lock().iter().find(|u| u.path == path).cloned()
	}
}

#[cfg(test)]
mod tests;
