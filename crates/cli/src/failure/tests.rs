use std::path::PathBuf;

use fave_factory::plugin::{PluginError, PluginUnit};
use fave_library::EntryError;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

fn open_failure() -> PluginError {
	match PluginUnit::open("/nonexistent/libfave_missing.so") {
		Err(err) => err,
		Ok(_) => panic!("nonexistent unit opened"),
	}
}

#[rstest]
#[case(Failure::UnknownKey { key: "Atlas".into() }, 1)]
#[case(
	Failure::Plugin(PluginError::Incompatible { path: PathBuf::from("p.so"), expected: 1, found: 2 }),
	3
)]
#[case(
	Failure::Construct { key: "Book".into(), source: EntryError::MissingLibraryName.into() },
	4
)]
#[case(
	Failure::Plugin(PluginError::EntryFailed { path: PathBuf::from("p.so"), reason: "status Failed".into() }),
	5
)]
#[case(Failure::Config(anyhow::anyhow!("bad toml")), 6)]
#[case(Failure::Usage("entry key is empty".into()), 64)]
fn test_exit_codes(#[case] failure: Failure, #[case] code: u8) {
	assert_eq!(failure.exit_code(), code);
}

#[test]
fn test_open_failure_exit_code() {
	let failure = Failure::from(open_failure());
	assert_eq!(failure.exit_code(), 2);
	assert!(failure.to_string().starts_with("failed to load '/nonexistent/libfave_missing.so'"));
}

#[test]
fn test_messages() {
	assert_eq!(
		Failure::UnknownKey { key: "Atlas".into() }.to_string(),
		"no library entry is registered as 'Atlas'"
	);
	assert_eq!(
		Failure::Construct {
			key: "Book".into(),
			source: EntryError::MissingLibraryName.into(),
		}
		.to_string(),
		"failed to construct 'Book': library name is empty"
	);
	let config = anyhow::anyhow!("expected `=`").context("invalid config file c.toml");
	assert_eq!(
		Failure::Config(config).to_string(),
		"invalid config file c.toml: expected `=`"
	);
}
