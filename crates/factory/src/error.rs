/// Error produced by a maker while constructing an object.
///
/// Factories never wrap or inspect it; `make` hands back exactly what the maker returned.
pub type MakeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registry-level errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A key was declared twice under [`crate::DuplicatePolicy::Reject`].
	#[error("duplicate key {key:?} in registry {registry} (existing from {existing})")]
	Duplicate {
		registry: &'static str,
		key: String,
		existing: String,
	},
}
