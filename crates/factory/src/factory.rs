//! The name-keyed registry itself.
//!
//! # Invariants
//!
//! - Every key present in the map has exactly one maker.
//! - A maker never runs while the map lock is held, so a constructor may use the
//!   factory that is constructing it.
//! - An unknown key is answered with `Ok(None)`, never with an error.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{DuplicatePolicy, InsertAction, MakeError, RegistryError, RegistrySource};

/// Stored constructor: builds one new object from the factory's argument type.
pub type Maker<H, A = ()> = Arc<dyn Fn(A) -> Result<H, MakeError> + Send + Sync>;

struct Slot<H, A> {
	maker: Maker<H, A>,
	source: RegistrySource,
}

struct Inner<H, A> {
	policy: DuplicatePolicy,
	slots: HashMap<String, Slot<H, A>>,
}

/// Maps registration keys to makers producing handles of type `H`.
///
/// `A` is the constructor argument type, fixed for the whole registry; use a tuple or a
/// context struct for several arguments. A factory is an identity-bearing object and is not
/// `Clone`: declare process-wide ones with [`crate::declare_factory!`].
pub struct Factory<H, A = ()> {
	label: &'static str,
	inner: RwLock<Inner<H, A>>,
}

impl<H, A> Factory<H, A> {
	/// Creates an empty factory with the default [`DuplicatePolicy::LastWins`].
	pub fn new(label: &'static str) -> Self {
		Self::with_policy(label, DuplicatePolicy::default())
	}

	/// Creates an empty factory with the given duplicate policy.
	pub fn with_policy(label: &'static str, policy: DuplicatePolicy) -> Self {
		Self {
			label,
			inner: RwLock::new(Inner {
				policy,
				slots: HashMap::new(),
			}),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.inner.read().policy
	}

	/// Changes how later duplicate declarations are treated. Existing entries are untouched.
	pub fn set_policy(&self, policy: DuplicatePolicy) {
		self.inner.write().policy = policy;
	}

	/// Declares `maker` under `key` as a [`RegistrySource::Runtime`] entry.
	pub fn declare<F>(&self, key: impl Into<String>, maker: F) -> Result<InsertAction, RegistryError>
	where
		F: Fn(A) -> Result<H, MakeError> + Send + Sync + 'static,
	{
		self.declare_maker(key, RegistrySource::Runtime, Arc::new(maker))
	}

	/// Declares `maker` under `key`, recording where the declaration came from.
	pub fn declare_from<F>(
		&self,
		key: impl Into<String>,
		source: RegistrySource,
		maker: F,
	) -> Result<InsertAction, RegistryError>
	where
		F: Fn(A) -> Result<H, MakeError> + Send + Sync + 'static,
	{
		self.declare_maker(key, source, Arc::new(maker))
	}

	/// Declares an already shared maker.
	///
	/// Collisions follow the current [`DuplicatePolicy`]. Under [`DuplicatePolicy::Reject`] the
	/// map is left exactly as it was.
	pub fn declare_maker(
		&self,
		key: impl Into<String>,
		source: RegistrySource,
		maker: Maker<H, A>,
	) -> Result<InsertAction, RegistryError> {
		let key = key.into();
		let mut inner = self.inner.write();
		let policy = inner.policy;

		match inner.slots.entry(key) {
			Entry::Vacant(ve) => {
				debug!(registry = self.label, key = %ve.key(), %source, "declared");
				ve.insert(Slot { maker, source });
				Ok(InsertAction::InsertedNew)
			}
			Entry::Occupied(mut oe) => match policy {
				DuplicatePolicy::LastWins => {
					debug!(
						registry = self.label,
						key = %oe.key(),
						existing = %oe.get().source,
						%source,
						"replaced existing maker"
					);
					oe.insert(Slot { maker, source });
					Ok(InsertAction::ReplacedExisting)
				}
				DuplicatePolicy::FirstWins => {
					debug!(
						registry = self.label,
						key = %oe.key(),
						existing = %oe.get().source,
						%source,
						"kept existing maker"
					);
					Ok(InsertAction::KeptExisting)
				}
				DuplicatePolicy::Reject => Err(RegistryError::Duplicate {
					registry: self.label,
					key: oe.key().clone(),
					existing: oe.get().source.to_string(),
				}),
			},
		}
	}

	/// Constructs a new object registered under `key`.
	///
	/// Returns `Ok(None)` if nothing is registered under `key`. A maker's error is returned as is.
	pub fn make(&self, key: &str, args: A) -> Result<Option<H>, MakeError> {
		let maker = {
			let inner = self.inner.read();
			match inner.slots.get(key) {
				Some(slot) => Arc::clone(&slot.maker),
				None => {
					trace!(registry = self.label, key, "unknown key");
					return Ok(None);
				}
			}
		};
		maker(args).map(Some)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.inner.read().slots.contains_key(key)
	}

	/// Returns where the maker currently registered under `key` was declared from.
	pub fn source(&self, key: &str) -> Option<RegistrySource> {
		self.inner.read().slots.get(key).map(|slot| slot.source.clone())
	}

	pub fn len(&self) -> usize {
		self.inner.read().slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.read().slots.is_empty()
	}

	/// Returns all registered keys, sorted.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<_> = self.inner.read().slots.keys().cloned().collect();
		keys.sort_unstable();
		keys
	}
}

impl<H, A> std::fmt::Debug for Factory<H, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.read();
		f.debug_struct("Factory")
			.field("label", &self.label)
			.field("policy", &inner.policy)
			.field("len", &inner.slots.len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
