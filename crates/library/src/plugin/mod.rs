//! Host side of the library-entry plugin ABI.
//!
//! # Protocol
//!
//! 1. Open the unit ([`fave_factory::plugin::PluginError::Open`] on failure).
//! 2. Resolve the entry symbol as [`FavePluginEntryV1`]
//!    ([`fave_factory::plugin::PluginError::Symbol`]).
//! 3. Call it with a [`FaveHostV1`] whose `declare` stages makers instead of registering them.
//! 4. Check the guest's status and ABI version
//!    ([`fave_factory::plugin::PluginError::Incompatible`], [`fave_factory::plugin::PluginError::EntryFailed`]).
//! 5. Commit the staged makers into the target warehouse and retain the unit.
//!
//! Nothing reaches the registry unless every step succeeds.

mod foreign;
mod host;

use std::mem::size_of;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use fave_cabi_types::{
	FAVE_C_ABI_VERSION, FAVE_PLUGIN_ENTRY_SYMBOL, FaveGuestV1, FaveHostV1, FavePluginEntryV1,
	FaveStatus, FaveStr,
};
use fave_factory::plugin::{PluginError, PluginLoader, PluginUnit};
use fave_factory::{InsertAction, RegistrySource};
use tracing::{info, warn};

pub use foreign::{ForeignEntry, ForeignError};
use host::{Registrar, host_declare, host_log};

use crate::{EntryWarehouse, LIBRARY_ENTRIES};

/// Units loaded into this process. Never unloaded.
pub static PLUGINS: LazyLock<PluginLoader> = LazyLock::new(PluginLoader::new);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
	/// Name of the entry point to resolve.
	pub entry_symbol: String,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			entry_symbol: FAVE_PLUGIN_ENTRY_SYMBOL.to_string(),
		}
	}
}

/// What a successful load contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginReport {
	pub path: PathBuf,
	/// Name the plugin reported for itself.
	pub name: String,
	/// Keys committed, with what each commit did.
	pub declared: Vec<(String, InsertAction)>,
	/// Keys refused under [`fave_factory::DuplicatePolicy::Reject`].
	pub refused: Vec<String>,
}

/// Loads the unit at `path` into [`LIBRARY_ENTRIES`], keeping it in [`PLUGINS`].
pub fn load_plugin(path: impl AsRef<Path>, options: &LoadOptions) -> Result<PluginReport, PluginError> {
	load_plugin_into(&PLUGINS, &LIBRARY_ENTRIES, path.as_ref(), options)
}

/// Loads the unit at `path` into `target`, retaining it in `loader` on success.
pub fn load_plugin_into(
	loader: &PluginLoader,
	target: &EntryWarehouse,
	path: &Path,
	options: &LoadOptions,
) -> Result<PluginReport, PluginError> {
	let unit = loader.open(path)?;
	// SAFETY: `FavePluginEntryV1` is the documented type of the entry symbol, and `unit` is
	// retained below for as long as anything declared from it can run.
	let entry = unsafe { unit.symbol::<FavePluginEntryV1>(&options.entry_symbol)? };
	// SAFETY: `entry` was resolved from `unit`, which is passed along to keep it loaded.
	let report = unsafe { run_entry(entry, unit.path(), Some(Arc::clone(&unit)), target)? };
	loader.retain(unit);
	Ok(report)
}

/// Runs a plugin entry point against `target`.
///
/// `unit` is captured by every committed maker; pass `None` only for entry points linked
/// into the host itself.
///
/// # Safety
///
/// `entry` must follow the `fave-cabi-types` contract and stay callable, with every maker it
/// declares, for as long as `unit` (or the host, if `None`) is loaded.
pub unsafe fn run_entry(
	entry: FavePluginEntryV1,
	path: &Path,
	unit: Option<Arc<PluginUnit>>,
	target: &EntryWarehouse,
) -> Result<PluginReport, PluginError> {
	let mut registrar = Registrar::new(target);
	let host = FaveHostV1 {
		struct_size: size_of::<FaveHostV1>(),
		abi_version: FAVE_C_ABI_VERSION,
		registrar: (&mut registrar as *mut Registrar<'_>).cast(),
		declare: host_declare,
		log: Some(host_log),
	};
	let mut guest = FaveGuestV1 {
		abi_version: 0,
		name: FaveStr::empty(),
	};

	// SAFETY: forwarded to the caller; `host` and `guest` outlive the call.
	let status = unsafe { entry(&host, &mut guest) };
	match status {
		FaveStatus::Ok if guest.abi_version == FAVE_C_ABI_VERSION => {}
		FaveStatus::Ok | FaveStatus::Incompatible => {
			return Err(PluginError::Incompatible {
				path: path.to_path_buf(),
				expected: FAVE_C_ABI_VERSION,
				found: guest.abi_version,
			});
		}
		FaveStatus::Failed | FaveStatus::Rejected => {
			return Err(PluginError::EntryFailed {
				path: path.to_path_buf(),
				reason: format!("status {status:?}"),
			});
		}
	}

	// SAFETY: the guest name is static data of the unit.
	let name = unsafe { guest.name.as_str() }.unwrap_or_default().to_string();
	let source = RegistrySource::Plugin(Arc::from(path.display().to_string()));
	let Registrar { staged, mut refused, .. } = registrar;

	let mut declared = Vec::with_capacity(staged.len());
	for (key, maker) in staged {
		let maker = foreign::foreign_maker(key.clone(), maker, unit.clone());
		match target.declare_maker(key.clone(), source.clone(), maker) {
			Ok(action) => declared.push((key, action)),
			Err(err) => {
				warn!(%err, "plugin declaration rejected at commit");
				refused.push(key);
			}
		}
	}

	info!(
		plugin = %name,
		path = %path.display(),
		declared = declared.len(),
		refused = refused.len(),
		"plugin entries registered"
	);
	Ok(PluginReport {
		path: path.to_path_buf(),
		name,
		declared,
		refused,
	})
}
