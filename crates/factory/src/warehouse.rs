//! A factory that keeps every object it has made.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{DuplicatePolicy, Factory, InsertAction, MakeError, Maker, RegistryError, RegistrySource};

/// A [`Factory`] of `Arc<T>` handles with a warehouse holding every object produced.
///
/// Useful when the code that requests objects is not the code that later needs to walk
/// over all of them. The warehouse only grows; its length is the number of successful
/// [`Warehouse::make`] calls.
pub struct Warehouse<T: ?Sized, A = ()> {
	factory: Factory<Arc<T>, A>,
	stock: Mutex<Vec<Arc<T>>>,
}

impl<T: ?Sized, A> Warehouse<T, A> {
	pub fn new(label: &'static str) -> Self {
		Self::with_policy(label, DuplicatePolicy::default())
	}

	pub fn with_policy(label: &'static str, policy: DuplicatePolicy) -> Self {
		Self {
			factory: Factory::with_policy(label, policy),
			stock: Mutex::new(Vec::new()),
		}
	}

	/// Returns the underlying factory for declarations and introspection.
	///
	/// Objects made directly through the returned factory are *not* warehoused.
	pub fn factory(&self) -> &Factory<Arc<T>, A> {
		&self.factory
	}

	pub fn declare<F>(&self, key: impl Into<String>, maker: F) -> Result<InsertAction, RegistryError>
	where
		F: Fn(A) -> Result<Arc<T>, MakeError> + Send + Sync + 'static,
	{
		self.factory.declare(key, maker)
	}

	pub fn declare_from<F>(
		&self,
		key: impl Into<String>,
		source: RegistrySource,
		maker: F,
	) -> Result<InsertAction, RegistryError>
	where
		F: Fn(A) -> Result<Arc<T>, MakeError> + Send + Sync + 'static,
	{
		self.factory.declare_from(key, source, maker)
	}

	pub fn declare_maker(
		&self,
		key: impl Into<String>,
		source: RegistrySource,
		maker: Maker<Arc<T>, A>,
	) -> Result<InsertAction, RegistryError> {
		self.factory.declare_maker(key, source, maker)
	}

	/// Constructs a new object under `key` and keeps a handle to it.
	///
	/// Same contract as [`Factory::make`]; unknown keys and maker failures store nothing.
	pub fn make(&self, key: &str, args: A) -> Result<Option<Arc<T>>, MakeError> {
		let made = self.factory.make(key, args)?;
		if let Some(obj) = &made {
			self.stock.lock().push(Arc::clone(obj));
		}
		Ok(made)
	}

	/// Calls `visitor` on every warehoused object in construction order.
	///
	/// Visits the objects present when the call starts; the visitor may make new objects,
	/// which are kept but not visited by this pass.
	pub fn apply<F>(&self, mut visitor: F)
	where
		F: FnMut(&Arc<T>),
	{
		let stock = self.stock.lock().clone();
		for obj in &stock {
			visitor(obj);
		}
	}

	/// Number of objects made so far.
	pub fn produced(&self) -> usize {
		self.stock.lock().len()
	}
}

impl<T: ?Sized, A> std::fmt::Debug for Warehouse<T, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Warehouse")
			.field("factory", &self.factory)
			.field("produced", &self.produced())
			.finish()
	}
}
