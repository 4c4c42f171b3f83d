//! The process-wide registry sees linked-in entries without any explicit setup.

use fave_factory::RegistrySource;
use fave_library::{EntryContext, EntryError, LIBRARY_ENTRIES};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;

#[test]
#[serial]
fn test_book_self_registered() {
	assert!(LIBRARY_ENTRIES.factory().contains("Book"));
	assert_eq!(
		LIBRARY_ENTRIES.factory().source("Book"),
		Some(RegistrySource::Crate("fave-library"))
	);
	assert_eq!(LIBRARY_ENTRIES.factory().label(), "LIBRARY_ENTRIES");
}

#[test]
#[serial]
fn test_make_book() {
	let before = LIBRARY_ENTRIES.produced();
	let book = LIBRARY_ENTRIES
		.make("Book", EntryContext::new("Metro Library"))
		.unwrap()
		.expect("Book is linked in");
	assert_eq!(book.name(), "Poverty, By America from Metro Library");
	assert_eq!(LIBRARY_ENTRIES.produced(), before + 1);
}

#[rstest]
#[case("")]
#[case("   ")]
#[serial]
fn test_book_requires_library_name(#[case] name: &str) {
	let before = LIBRARY_ENTRIES.produced();
	let err = match LIBRARY_ENTRIES.make("Book", EntryContext::new(name)) {
		Err(err) => err,
		Ok(_) => panic!("blank library name must fail"),
	};
	assert_eq!(err.downcast_ref::<EntryError>(), Some(&EntryError::MissingLibraryName));
	assert_eq!(LIBRARY_ENTRIES.produced(), before);
}

#[test]
#[serial]
fn test_unknown_entry() {
	let before = LIBRARY_ENTRIES.produced();
	assert!(
		LIBRARY_ENTRIES
			.make("Encyclopedia", EntryContext::new("Metro Library"))
			.unwrap()
			.is_none()
	);
	assert_eq!(LIBRARY_ENTRIES.produced(), before);
}
