use std::sync::Arc;

use fave_factory::MakeError;

/// Something that can be found in a library.
pub trait LibraryEntry: Send + Sync {
	/// Human-readable label, e.g. `"Poverty, By America from Metro Library"`.
	fn name(&self) -> String;
}

/// Shared handle the entry registry hands out.
pub type EntryHandle = Arc<dyn LibraryEntry>;

/// Constructor arguments for every library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryContext {
	/// Name of the library holding the entry.
	pub library_name: Arc<str>,
}

impl EntryContext {
	pub fn new(library_name: impl Into<Arc<str>>) -> Self {
		Self {
			library_name: library_name.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
	#[error("library name is empty")]
	MissingLibraryName,
}

/// Linked-in entry types constructible from an [`EntryContext`].
pub trait NewEntry: LibraryEntry + Sized + 'static {
	fn new_entry(ctx: EntryContext) -> Result<Self, MakeError>;
}

/// Maker used by [`crate::library_entry!`]: builds a `T` and upcasts it.
pub fn construct<T: NewEntry>(ctx: EntryContext) -> Result<EntryHandle, MakeError> {
	let entry: EntryHandle = Arc::new(T::new_entry(ctx)?);
	Ok(entry)
}
