use std::ffi::OsStr;

use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;

use super::*;

/// Points `FAVE_CONFIG_DIR` at `dir` for the duration of `f`.
fn with_config_dir<R>(dir: impl AsRef<OsStr>, f: impl FnOnce() -> R) -> R {
	let previous = std::env::var_os(CONFIG_DIR_ENV);
	// SAFETY: every test touching the environment is `#[serial]`.
	unsafe { std::env::set_var(CONFIG_DIR_ENV, dir) };
	let out = f();
	// SAFETY: as above.
	unsafe {
		match previous {
			Some(value) => std::env::set_var(CONFIG_DIR_ENV, value),
			None => std::env::remove_var(CONFIG_DIR_ENV),
		}
	}
	out
}

#[test]
fn test_defaults() {
	let config = FaveConfig::default();
	assert_eq!(config.library.name, "Metro Library");
	assert_eq!(config.plugins.entry_symbol, "fave_plugin_entry_v1");
	assert_eq!(config.plugins.duplicates, DuplicatePolicy::LastWins);
}

#[test]
fn test_parse_full() {
	let config = FaveConfig::parse(
		r#"
		[library]
		name = "Branch Library"

		[plugins]
		entry_symbol = "my_entry"
		duplicates = "first-wins"
		"#,
	)
	.unwrap();
	assert_eq!(config.library.name, "Branch Library");
	assert_eq!(config.load_options().entry_symbol, "my_entry");
	assert_eq!(config.plugins.duplicates, DuplicatePolicy::FirstWins);
}

#[test]
fn test_parse_partial_fills_defaults() {
	let config = FaveConfig::parse("[plugins]\nduplicates = \"reject\"\n").unwrap();
	assert_eq!(config.library, LibraryConfig::default());
	assert_eq!(config.plugins.entry_symbol, "fave_plugin_entry_v1");
	assert_eq!(config.plugins.duplicates, DuplicatePolicy::Reject);
	assert_eq!(FaveConfig::parse("").unwrap(), FaveConfig::default());
}

#[test]
fn test_parse_rejects_unknown_policy_and_fields() {
	assert!(FaveConfig::parse("[plugins]\nduplicates = \"newest\"\n").is_err());
	assert!(FaveConfig::parse("[library]\ntitle = \"x\"\n").is_err());
}

#[test]
#[serial]
fn test_load_from_config_dir() {
	let dir = TempDir::new().unwrap();
	std::fs::write(dir.path().join(CONFIG_FILE), "[library]\nname = \"Branch Library\"\n").unwrap();

	let config = with_config_dir(dir.path(), || FaveConfig::load(None)).unwrap();
	assert_eq!(config.library.name, "Branch Library");
}

#[test]
#[serial]
fn test_missing_file_in_config_dir_is_default() {
	let dir = TempDir::new().unwrap();
	let config = with_config_dir(dir.path(), || FaveConfig::load(None)).unwrap();
	assert_eq!(config, FaveConfig::default());
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env() {
	let env_dir = TempDir::new().unwrap();
	std::fs::write(env_dir.path().join(CONFIG_FILE), "[library]\nname = \"Env Library\"\n").unwrap();
	let other = TempDir::new().unwrap();
	let explicit = other.path().join("custom.toml");
	std::fs::write(&explicit, "[library]\nname = \"Explicit Library\"\n").unwrap();

	let config = with_config_dir(env_dir.path(), || FaveConfig::load(Some(&explicit))).unwrap();
	assert_eq!(config.library.name, "Explicit Library");
	assert_eq!(config_path(Some(&explicit)), Some(explicit.clone()));
}

#[test]
fn test_explicit_missing_file_is_error() {
	let dir = TempDir::new().unwrap();
	let missing = dir.path().join("nope.toml");
	let err = FaveConfig::load(Some(&missing)).unwrap_err();
	assert!(format!("{err:#}").starts_with("failed to read config file"), "got {err:#}");
}

#[test]
fn test_invalid_file_has_context() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join(CONFIG_FILE);
	std::fs::write(&path, "[library\n").unwrap();
	let err = FaveConfig::load(Some(&path)).unwrap_err();
	assert_eq!(err.to_string(), format!("invalid config file {}", path.display()));
}
