use serde::Deserialize;

/// How a factory treats a second declaration under an existing key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Overwrite with the last declaration seen.
	#[default]
	LastWins,
	/// Keep the first declaration seen for a key.
	FirstWins,
	/// Refuse the declaration with [`crate::RegistryError::Duplicate`].
	Reject,
}

impl std::fmt::Display for DuplicatePolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::LastWins => write!(f, "last-wins"),
			Self::FirstWins => write!(f, "first-wins"),
			Self::Reject => write!(f, "reject"),
		}
	}
}

/// Result of a successful declaration.
///
/// Carries no meaning callers must act on; self-registration binds it so the
/// declaration is not optimized out of existence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Key was new; maker inserted.
	InsertedNew,
	/// Key existed; kept the existing maker (policy chose existing).
	KeptExisting,
	/// Key existed; replaced with the new maker (policy chose new).
	ReplacedExisting,
}
