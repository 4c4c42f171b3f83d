use std::sync::Arc;

use fave_factory::MakeError;

use crate::{EntryContext, EntryError, LibraryEntry, NewEntry};

pub struct Book {
	library_name: Arc<str>,
}

impl LibraryEntry for Book {
	fn name(&self) -> String {
		format!("Poverty, By America from {}", self.library_name)
	}
}

impl NewEntry for Book {
	fn new_entry(ctx: EntryContext) -> Result<Self, MakeError> {
		if ctx.library_name.trim().is_empty() {
			return Err(EntryError::MissingLibraryName.into());
		}
		Ok(Self {
			library_name: ctx.library_name,
		})
	}
}

crate::library_entry!(Book);
