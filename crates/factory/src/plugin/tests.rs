use super::*;

/// A missing file is an open failure carrying the platform diagnostic.
#[test]
fn test_open_missing_unit() {
	let err = PluginUnit::open("/nonexistent/libfave_missing.so").unwrap_err();
	assert!(matches!(err, PluginError::Open { .. }), "got {err:?}");
	assert_eq!(err.path(), Path::new("/nonexistent/libfave_missing.so"));

	let msg = err.to_string();
	assert!(msg.starts_with("failed to load '/nonexistent/libfave_missing.so': "), "{msg}");
}

/// A failed open leaves the loader without units.
#[test]
fn test_loader_retains_nothing_on_failure() {
	let loader = PluginLoader::new();
	assert!(loader.open("/nonexistent/libfave_missing.so").is_err());
	assert!(loader.units().is_empty());
	assert!(loader.find(Path::new("/nonexistent/libfave_missing.so")).is_none());
}

#[test]
fn test_error_display() {
	let err = PluginError::Incompatible {
		path: PathBuf::from("libx.so"),
		expected: 1,
		found: 7,
	};
	assert_eq!(err.to_string(), "plugin 'libx.so' is incompatible: expected ABI 1, found 7");

	let err = PluginError::EntryFailed {
		path: PathBuf::from("libx.so"),
		reason: "status Failed".to_string(),
	};
	assert_eq!(err.to_string(), "entry point of 'libx.so' failed: status Failed");
}
