use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

trait Shape: Send + Sync {
	fn label(&self) -> String;
}

struct Square(u32);

impl Shape for Square {
	fn label(&self) -> String {
		format!("square {}", self.0)
	}
}

struct Circle;

impl Shape for Circle {
	fn label(&self) -> String {
		"circle".to_string()
	}
}

#[derive(Debug, thiserror::Error)]
#[error("side must be positive")]
struct ZeroSide;

fn shapes() -> Factory<Box<dyn Shape>, u32> {
	let factory: Factory<Box<dyn Shape>, u32> = Factory::new("shapes");
	factory
		.declare("Square", |side| {
			if side == 0 {
				return Err(ZeroSide.into());
			}
			Ok(Box::new(Square(side)) as Box<dyn Shape>)
		})
		.unwrap();
	factory
		.declare("Circle", |_| Ok(Box::new(Circle) as Box<dyn Shape>))
		.unwrap();
	factory
}

/// A declared key builds an object behaving exactly like the maker's output.
#[test]
fn test_make_declared_key() {
	let factory = shapes();
	let square = factory.make("Square", 4).unwrap().expect("Square is declared");
	assert_eq!(square.label(), Square(4).label());
	assert_eq!(factory.make("Circle", 0).unwrap().unwrap().label(), "circle");
}

/// Unknown keys answer `Ok(None)` instead of failing.
#[test]
fn test_unknown_key_is_none() {
	let factory = shapes();
	assert!(factory.make("Triangle", 3).unwrap().is_none());
	assert!(factory.make("", 3).unwrap().is_none());
}

/// A maker's error is handed back untouched.
#[test]
fn test_constructor_failure_propagates() {
	let factory = shapes();
	let err = match factory.make("Square", 0) {
		Err(err) => err,
		Ok(_) => panic!("zero side must fail"),
	};
	assert!(err.downcast_ref::<ZeroSide>().is_some());
	assert_eq!(err.to_string(), "side must be positive");
}

#[rstest]
#[case::last_wins(DuplicatePolicy::LastWins, InsertAction::ReplacedExisting, "second")]
#[case::first_wins(DuplicatePolicy::FirstWins, InsertAction::KeptExisting, "first")]
fn test_redeclare_follows_policy(
	#[case] policy: DuplicatePolicy,
	#[case] action: InsertAction,
	#[case] winner: &str,
) {
	let factory: Factory<String> = Factory::with_policy("strings", policy);
	assert_eq!(
		factory.declare("k", |()| Ok("first".to_string())).unwrap(),
		InsertAction::InsertedNew
	);
	assert_eq!(factory.declare("k", |()| Ok("second".to_string())).unwrap(), action);
	assert_eq!(factory.make("k", ()).unwrap().as_deref(), Some(winner));
	assert_eq!(factory.len(), 1);
}

/// Under `Reject`, a duplicate leaves the original maker and reports the collision.
#[test]
fn test_reject_duplicate() {
	let factory: Factory<String> = Factory::with_policy("strings", DuplicatePolicy::Reject);
	factory.declare("k", |()| Ok("first".to_string())).unwrap();
	let err = factory
		.declare_from("k", RegistrySource::Crate("other"), |()| Ok("second".to_string()))
		.unwrap_err();
	assert_eq!(
		err,
		RegistryError::Duplicate {
			registry: "strings",
			key: "k".to_string(),
			existing: "runtime".to_string(),
		}
	);
	assert_eq!(factory.make("k", ()).unwrap().as_deref(), Some("first"));
	assert_eq!(factory.source("k"), Some(RegistrySource::Runtime));
}

/// The policy can be tightened after startup without touching existing entries.
#[test]
fn test_set_policy() {
	let factory: Factory<u8> = Factory::new("bytes");
	factory.declare("a", |()| Ok(1)).unwrap();
	factory.set_policy(DuplicatePolicy::Reject);
	assert_eq!(factory.policy(), DuplicatePolicy::Reject);
	assert!(factory.declare("a", |()| Ok(2)).is_err());
	assert_eq!(factory.make("a", ()).unwrap(), Some(1));
}

#[test]
fn test_introspection() {
	let factory = shapes();
	assert_eq!(factory.label(), "shapes");
	assert_eq!(factory.keys(), vec!["Circle".to_string(), "Square".to_string()]);
	assert!(factory.contains("Circle"));
	assert!(!factory.contains("circle"));
	assert!(!factory.is_empty());
	assert_eq!(factory.source("Square"), Some(RegistrySource::Runtime));
	assert_eq!(factory.source("Hexagon"), None);
}

/// A maker may use the factory that is running it.
#[test]
fn test_reentrant_maker() {
	let factory: Arc<Factory<String>> = Arc::new(Factory::new("nested"));
	factory.declare("inner", |()| Ok("inner".to_string())).unwrap();
	let weak = Arc::downgrade(&factory);
	factory
		.declare("outer", move |()| {
			let factory = weak.upgrade().ok_or("factory dropped")?;
			let inner = factory.make("inner", ())?.ok_or("inner missing")?;
			Ok(format!("outer({inner})"))
		})
		.unwrap();
	assert_eq!(factory.make("outer", ()).unwrap().as_deref(), Some("outer(inner)"));
}

proptest! {
	/// Keys never declared always come back empty.
	#[test]
	fn prop_undeclared_keys_are_none(key in "\\PC*") {
		prop_assume!(key != "Square" && key != "Circle");
		let factory = shapes();
		prop_assert!(factory.make(&key, 1).unwrap().is_none());
	}
}
