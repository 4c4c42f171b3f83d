//! Library entries and the process-wide registry they self-register into.
//!
//! Linked-in entries use [`library_entry!`]; entries from shared libraries arrive through
//! [`plugin::load_plugin`]. Both end up in [`LIBRARY_ENTRIES`], so callers only ever say
//! `LIBRARY_ENTRIES.make(key, ctx)`.

mod builtins;
mod entry;
pub mod plugin;

pub use builtins::Book;
pub use entry::{EntryContext, EntryError, EntryHandle, LibraryEntry, NewEntry, construct};

fave_factory::declare_factory! {
	/// Every library entry type known to the process, and every entry made so far.
	pub static LIBRARY_ENTRIES: fave_factory::Warehouse<dyn LibraryEntry, EntryContext>,
	registration = LibraryEntryReg,
}

/// Warehouse type behind [`LIBRARY_ENTRIES`].
pub type EntryWarehouse = fave_factory::Warehouse<dyn LibraryEntry, EntryContext>;

/// Registers a [`NewEntry`] type in [`LIBRARY_ENTRIES`].
///
/// The key defaults to the type's name.
///
/// ```ignore
/// fave_library::library_entry!(Book);
/// fave_library::library_entry!(Book, "Paperback");
/// ```
#[macro_export]
macro_rules! library_entry {
	($ty:ident) => {
		$crate::library_entry!($ty, stringify!($ty));
	};
	($ty:ty, $key:expr) => {
		$crate::__private::fave_factory::factory_registration!(
			$crate::LibraryEntryReg,
			$key,
			$crate::construct::<$ty>
		);
	};
}

#[doc(hidden)]
pub mod __private {
	pub use fave_factory;
}
