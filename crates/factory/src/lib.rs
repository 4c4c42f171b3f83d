//! Name-keyed factories for trait objects.
//!
//! # Mental Model
//!
//! 1. **Declaration:** an interface crate defines one process-wide registry with
//!    [`declare_factory!`]. The registry is a [`LazyLock`](std::sync::LazyLock) static, built on
//!    first access.
//! 2. **Self-registration:** concrete types submit a [`Registration`] record next to their own
//!    definition with [`factory_registration!`]. No central list names them. Every record linked
//!    into the process is ingested when the registry is first touched.
//! 3. **Extension:** foreign code opened through [`plugin::PluginUnit`] declares further makers
//!    at runtime with [`Factory::declare_from`].
//! 4. **Consumption:** callers request objects by key with [`Factory::make`] or
//!    [`Warehouse::make`], and only ever see the handle type (`Box<dyn T>`, `Arc<dyn T>`).
//!
//! # Failure Classes
//!
//! | Outcome | Representation |
//! |---------|----------------|
//! | Unknown key | `Ok(None)` from `make` |
//! | Constructor failure | `Err(MakeError)` from `make`, the maker's own error value |
//! | Duplicate key under [`DuplicatePolicy::Reject`] | [`RegistryError::Duplicate`] |
//! | Plugin unit failed to open | [`plugin::PluginError::Open`] |
//! | Entry symbol missing | [`plugin::PluginError::Symbol`] |

mod error;
mod factory;
mod meta;
pub mod plugin;
mod policy;
mod registration;
mod warehouse;

pub use error::{MakeError, RegistryError};
pub use factory::{Factory, Maker};
pub use meta::RegistrySource;
pub use policy::{DuplicatePolicy, InsertAction};
pub use registration::{Registration, Registry};
pub use warehouse::Warehouse;

#[doc(hidden)]
pub mod __private {
	pub use inventory;
}
