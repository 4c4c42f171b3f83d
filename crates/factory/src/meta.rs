use std::sync::Arc;

/// Represents where a maker was declared from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrySource {
	/// Built into the crate that declares the registry.
	Builtin,
	/// Self-registered from a linked library crate.
	Crate(&'static str),
	/// Declared by a plugin unit loaded at runtime (path of the unit).
	Plugin(Arc<str>),
	/// Declared programmatically after startup.
	Runtime,
}

impl core::fmt::Display for RegistrySource {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Builtin => write!(f, "builtin"),
			Self::Crate(name) => write!(f, "crate:{name}"),
			Self::Plugin(path) => write!(f, "plugin:{path}"),
			Self::Runtime => write!(f, "runtime"),
		}
	}
}
