//! Self-registration records and the macros that collect them.
//!
//! A registry declared with [`declare_factory!`](crate::declare_factory) is a
//! [`LazyLock`](std::sync::LazyLock) static. Its initializer walks every record submitted with
//! [`factory_registration!`](crate::factory_registration) anywhere in the linked program, so all
//! of them are present before the first lookup, regardless of crate or module order.

use std::sync::Arc;

use tracing::warn;

use crate::{Factory, InsertAction, MakeError, RegistryError, RegistrySource, Warehouse};

/// A const-constructible declaration, submitted through `inventory`.
pub struct Registration<H, A = ()> {
	/// Registration key, usually the concrete type's name.
	pub key: &'static str,
	/// Where the record was submitted from.
	pub source: RegistrySource,
	/// Builds one new object.
	pub maker: fn(A) -> Result<H, MakeError>,
}

impl<H, A> Registration<H, A> {
	/// Creates a [`RegistrySource::Builtin`] record.
	pub const fn new(key: &'static str, maker: fn(A) -> Result<H, MakeError>) -> Self {
		Self {
			key,
			source: RegistrySource::Builtin,
			maker,
		}
	}

	/// Creates a record with an explicit source.
	pub const fn sourced(
		key: &'static str,
		source: RegistrySource,
		maker: fn(A) -> Result<H, MakeError>,
	) -> Self {
		Self { key, source, maker }
	}
}

/// Registries that can be built by [`declare_factory!`](crate::declare_factory).
pub trait Registry: Sized {
	/// Handle type returned by `make`.
	type Handle;
	/// Constructor argument type.
	type Args;

	/// Creates an empty registry.
	fn create(label: &'static str) -> Self;

	/// Declares a static record.
	fn declare_registration(
		&self,
		registration: &Registration<Self::Handle, Self::Args>,
	) -> Result<InsertAction, RegistryError>;

	/// Declares a collected record, logging instead of failing on a rejected duplicate.
	fn ingest(&self, registration: &Registration<Self::Handle, Self::Args>) -> Option<InsertAction> {
		match self.declare_registration(registration) {
			Ok(action) => Some(action),
			Err(err) => {
				warn!(key = registration.key, source = %registration.source, %err, "registration rejected");
				None
			}
		}
	}
}

impl<H: 'static, A: 'static> Registry for Factory<H, A> {
	type Handle = H;
	type Args = A;

	fn create(label: &'static str) -> Self {
		Factory::new(label)
	}

	fn declare_registration(
		&self,
		registration: &Registration<H, A>,
	) -> Result<InsertAction, RegistryError> {
		self.declare_maker(registration.key, registration.source.clone(), Arc::new(registration.maker))
	}
}

impl<T: ?Sized + 'static, A: 'static> Registry for Warehouse<T, A> {
	type Handle = Arc<T>;
	type Args = A;

	fn create(label: &'static str) -> Self {
		Warehouse::new(label)
	}

	fn declare_registration(
		&self,
		registration: &Registration<Arc<T>, A>,
	) -> Result<InsertAction, RegistryError> {
		self.factory().declare_registration(registration)
	}
}

/// Declares a process-wide registry and the record type that self-registers into it.
///
/// ```ignore
/// fave_factory::declare_factory! {
///     /// Every shape ever made.
///     pub static SHAPES: fave_factory::Warehouse<dyn Shape>,
///     registration = ShapeReg,
/// }
/// ```
///
/// The static is built on first access and ingests every `ShapeReg` submitted with
/// [`factory_registration!`](crate::factory_registration).
#[macro_export]
macro_rules! declare_factory {
	(
		$(#[$meta:meta])*
		$vis:vis static $name:ident: $registry:ty,
		registration = $reg:ident $(,)?
	) => {
		#[doc = concat!("Self-registration record collected into [`", stringify!($name), "`].")]
		$vis struct $reg(
			pub $crate::Registration<
				<$registry as $crate::Registry>::Handle,
				<$registry as $crate::Registry>::Args,
			>,
		);

		$crate::__private::inventory::collect!($reg);

		$(#[$meta])*
		$vis static $name: ::std::sync::LazyLock<$registry> = ::std::sync::LazyLock::new(|| {
			let registry = <$registry as $crate::Registry>::create(stringify!($name));
			for reg in $crate::__private::inventory::iter::<$reg> {
				$crate::Registry::ingest(&registry, &reg.0);
			}
			registry
		});
	};
}

/// Submits a self-registration record for a registry declared with
/// [`declare_factory!`](crate::declare_factory).
///
/// `$maker` must be a non-capturing closure or a function matching the registry's
/// `fn(Args) -> Result<Handle, MakeError>`. The record's source is the submitting crate.
#[macro_export]
macro_rules! factory_registration {
	($reg:path, $key:expr, $maker:expr $(,)?) => {
		$crate::__private::inventory::submit! {
			$reg($crate::Registration::sourced(
				$key,
				$crate::RegistrySource::Crate(env!("CARGO_PKG_NAME")),
				$maker,
			))
		}
	};
}
