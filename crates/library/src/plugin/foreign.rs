//! Host-side wrappers around objects and makers living in a plugin unit.

use std::sync::Arc;

use fave_cabi_types::{FaveEntryArgsV1, FaveEntryMakerV1, FaveEntryObjectV1, FaveStatus, FaveStr};
use fave_factory::{MakeError, Maker};
use fave_factory::plugin::PluginUnit;

use super::host::string_sink;
use crate::{EntryContext, EntryHandle, LibraryEntry};

/// Failures reported by a plugin maker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForeignError {
	#[error("plugin maker for '{key}' failed ({status:?}): {message}")]
	Construct {
		key: String,
		status: FaveStatus,
		message: String,
	},
	#[error("plugin maker for '{key}' returned no object")]
	NullObject { key: String },
}

/// A [`LibraryEntry`] whose implementation lives in a plugin unit.
///
/// Holds the unit so its code stays mapped until the object is released.
pub struct ForeignEntry {
	object: FaveEntryObjectV1,
	_unit: Option<Arc<PluginUnit>>,
}

// SAFETY: the plugin ABI requires entry objects to be usable from any thread.
unsafe impl Send for ForeignEntry {}
// SAFETY: see above; `name` only takes shared access.
unsafe impl Sync for ForeignEntry {}

impl LibraryEntry for ForeignEntry {
	fn name(&self) -> String {
		let mut out = String::new();
		// SAFETY: `vtable` was checked non-null at construction and lives as long as the unit.
		let vtable = unsafe { &*self.object.vtable };
		(vtable.name)(self.object.data, string_sink(&mut out));
		out
	}
}

impl Drop for ForeignEntry {
	fn drop(&mut self) {
		// SAFETY: as in `name`; `drop` is called exactly once, before `_unit` is released.
		let vtable = unsafe { &*self.object.vtable };
		(vtable.drop)(self.object.data);
	}
}

/// Wraps a plugin maker as a registry maker.
pub(crate) fn foreign_maker(
	key: String,
	maker: FaveEntryMakerV1,
	unit: Option<Arc<PluginUnit>>,
) -> Maker<EntryHandle, EntryContext> {
	Arc::new(move |ctx: EntryContext| -> Result<EntryHandle, MakeError> {
		let mut message = String::new();
		let args = FaveEntryArgsV1 {
			library_name: FaveStr::new(&ctx.library_name),
			error: string_sink(&mut message),
		};
		let mut out = FaveEntryObjectV1 {
			data: std::ptr::null_mut(),
			vtable: std::ptr::null(),
		};

		let status = maker(&args, &mut out);
		if status != FaveStatus::Ok {
			return Err(ForeignError::Construct {
				key: key.clone(),
				status,
				message,
			}
			.into());
		}
		if out.vtable.is_null() {
			return Err(ForeignError::NullObject { key: key.clone() }.into());
		}

		let entry: EntryHandle = Arc::new(ForeignEntry {
			object: out,
			_unit: unit.clone(),
		});
		Ok(entry)
	})
}
