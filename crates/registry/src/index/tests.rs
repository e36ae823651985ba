use super::*;
use crate::{Prop, PropValue, Props};

#[test]
fn names_get_sequential_ordinals() {
	static DAYS: EnumType = EnumType::new("Day");
	DAYS.finalize(["MON", "TUE", "WED"]).unwrap();

	assert!(DAYS.is_closed());
	assert_eq!(DAYS.len(), 3);
	for (i, day) in DAYS.iter().enumerate() {
		assert_eq!(day.ordinal(), i as u64);
		assert_eq!(DAYS.from_ordinal(i as u64), Some(day));
	}
}

#[test]
fn finalize_returns_the_type() {
	static T: EnumType = EnumType::new("Chained");
	let ty = T.finalize(["A"]).unwrap();
	assert!(std::ptr::eq(ty, &T));
}

#[test]
fn closed_type_rejects_assembly() {
	static T: EnumType = EnumType::new("Closed");
	T.finalize(["A", "B"]).unwrap();

	assert!(matches!(T.assemble(), Err(EnumError::Instantiation { type_name: "Closed" })));
	assert!(matches!(T.finalize(["C"]), Err(EnumError::Instantiation { .. })));
	assert_eq!(T.len(), 2);
	assert!(T.get("C").is_none());
}

#[test]
fn duplicate_ordinal_is_rejected() {
	let ty = EnumType::leak("Dup");
	let err = ty
		.finalize([("A", Props::new().ordinal(4)), ("B", Props::new().ordinal(4))])
		.unwrap_err();
	match err {
		EnumError::DuplicateOrdinal { name, ordinal, existing, .. } => {
			assert_eq!(&*name, "B");
			assert_eq!(ordinal, 4);
			assert_eq!(&*existing, "A");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn explicit_ordinal_may_not_collide_with_a_default_one() {
	let ty = EnumType::leak("Collide");
	let err = ty.finalize([("A", Props::new()), ("B", Props::new().ordinal(0))]).unwrap_err();
	assert!(matches!(err, EnumError::DuplicateOrdinal { ordinal: 0, .. }));
}

#[test]
fn duplicate_name_is_rejected() {
	let ty = EnumType::leak("Names");
	let err = ty.finalize(["A", "B", "A"]).unwrap_err();
	assert!(matches!(err, EnumError::DuplicateName { ref name, .. } if &**name == "A"));
}

#[test]
fn invalid_ordinals_are_rejected() {
	for bad in [Prop::from("3"), Prop::from(-1), Prop::from(2.5), Prop::sibling("A"), Prop::computed(|_| PropValue::Int(1))] {
		let ty = EnumType::leak("Invalid");
		let err = ty.finalize([("A", Props::new().with(crate::ORDINAL_KEY, bad))]).unwrap_err();
		assert!(matches!(err, EnumError::InvalidOrdinal { .. }), "{err}");
	}
}

#[test]
fn integral_float_ordinal_is_accepted() {
	let ty = EnumType::leak("Float");
	ty.finalize([("A", Props::new().with(crate::ORDINAL_KEY, 2.0))]).unwrap();
	assert_eq!(ty.get("A").unwrap().ordinal(), 2);
}

#[test]
fn ordinals_above_i64_are_kept_exact() {
	let a = (1u64 << 63) + 1;
	let b = (1u64 << 63) + 2;
	let ty = EnumType::leak("Big");
	ty.finalize([("A", Props::new().ordinal(a)), ("B", Props::new().ordinal(b)), ("C", Props::new())])
		.unwrap();

	assert_eq!(ty.from_ordinal(a).map(EnumValue::name), Some("A"));
	assert_eq!(ty.from_ordinal(b).map(EnumValue::name), Some("B"));
	assert_eq!(ty.get("C").unwrap().ordinal(), b + 1);
	assert_eq!(ty.get("A").unwrap().get(crate::ORDINAL_KEY), Some(PropValue::UInt(a)));
}

#[test]
fn inexact_float_ordinal_is_rejected() {
	let ty = EnumType::leak("Inexact");
	let err = ty
		.finalize([("A", Props::new().with(crate::ORDINAL_KEY, 9_223_372_036_854_775_808.0))])
		.unwrap_err();
	assert!(matches!(err, EnumError::InvalidOrdinal { .. }), "{err}");
}

#[test]
fn failed_finalize_publishes_nothing() {
	let ty = EnumType::leak("Rollback");
	ty.finalize([("A", Props::new()), ("B", Props::new().ordinal(0))]).unwrap_err();

	assert!(!ty.is_closed());
	assert!(ty.get("A").is_none());
	assert!(ty.from_ordinal(0).is_none());
	assert_eq!(ty.iter().count(), 0);

	ty.finalize(["A", "B"]).unwrap();
	assert_eq!(ty.len(), 2);
}

#[test]
fn dropped_assembler_leaves_type_open() {
	let ty = EnumType::leak("Dropped");
	{
		let mut asm = ty.assemble().unwrap();
		asm.construct("A", Props::new()).unwrap();
		assert_eq!(asm.len(), 1);
	}
	assert!(!ty.is_closed());
	ty.finalize(["B"]).unwrap();
	assert_eq!(ty.names().collect::<Vec<_>>(), ["B"]);
}

#[test]
fn default_ordinal_skips_past_explicit_maximum() {
	let ty = EnumType::leak("Skip");
	ty.finalize([
		("A", Props::new()),
		("B", Props::new().ordinal(10)),
		("C", Props::new().ordinal(3)),
		("D", Props::new()),
	])
	.unwrap();
	let ordinals: Vec<(&str, u64)> = ty.iter_declared().map(|v| (v.name(), v.ordinal())).collect();
	assert_eq!(ordinals, [("A", 0), ("B", 10), ("C", 3), ("D", 11)]);
}

#[test]
fn iteration_is_ascending_by_ordinal() {
	let ty = EnumType::leak("Sparse");
	ty.finalize([("HIGH", Props::new().ordinal(8)), ("LOW", Props::new().ordinal(1)), ("MID", Props::new().ordinal(4))])
		.unwrap();
	assert_eq!(ty.names().collect::<Vec<_>>(), ["LOW", "MID", "HIGH"]);
	assert_eq!(ty.iter().rev().map(EnumValue::name).collect::<Vec<_>>(), ["HIGH", "MID", "LOW"]);
	assert_eq!(ty.iter_declared().map(EnumValue::name).collect::<Vec<_>>(), ["HIGH", "LOW", "MID"]);
}

#[test]
fn iteration_restarts() {
	let ty = EnumType::leak("Restart").finalize(["A", "B"]).unwrap();
	let first: Vec<_> = ty.into_iter().collect();
	let second: Vec<_> = ty.into_iter().collect();
	assert_eq!(first, second);
}

#[test]
fn misses_are_none() {
	let ty = EnumType::leak("Miss").finalize(["A"]).unwrap();
	assert!(ty.get("B").is_none());
	assert!(ty.from_ordinal(1).is_none());
}

#[test]
fn open_type_reads_are_empty() {
	let ty = EnumType::leak("Open");
	assert!(!ty.is_closed());
	assert!(ty.is_empty());
	assert!(ty.get("A").is_none());
	assert_eq!(format!("{ty:?}"), r#"EnumType { name: "Open", members: <open> }"#);
}

#[test]
fn lazy_type_finalizes_on_first_read() {
	static LAZY: EnumType = EnumType::lazy("Lazy", || Members::names(["ONE", "TWO"]));
	assert!(!LAZY.is_closed());
	assert_eq!(LAZY.get("TWO").unwrap().ordinal(), 1);
	assert!(LAZY.is_closed());
	assert!(matches!(LAZY.finalize(["THREE"]), Err(EnumError::Instantiation { .. })));
}

#[test]
#[should_panic(expected = "enum Broken")]
fn lazy_type_with_bad_members_panics() {
	static BROKEN: EnumType = EnumType::lazy("Broken", || Members::names(["A", "A"]));
	let _ = BROKEN.get("A");
}

#[test]
#[should_panic(expected = "enum Eager: member read while its definition is being built")]
fn lazy_initializer_reading_its_own_type_panics() {
	static EAGER: EnumType = EnumType::lazy("Eager", || {
		let _ = EAGER.get("A");
		Members::names(["A"])
	});
	let _ = EAGER.len();
}

#[test]
fn racing_first_reads_all_see_the_members() {
	static RACED: EnumType = EnumType::lazy("Raced", || Members::names(["A", "B", "C"]));
	let lens: Vec<usize> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..8).map(|_| s.spawn(|| RACED.len())).collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});
	assert_eq!(lens, [3; 8]);
}

#[test]
fn name_property_is_shadowed() {
	let ty = EnumType::leak("Shadow");
	ty.finalize([("REAL", Props::new().with("name", "fake"))]).unwrap();
	let v = ty.get("REAL").unwrap();
	assert_eq!(v.get("name"), Some(PropValue::from("REAL")));
	assert!(v.props().is_empty());
}

#[test]
fn contains_checks_identity() {
	let a = EnumType::leak("A").finalize(["X"]).unwrap();
	let b = EnumType::leak("B").finalize(["X"]).unwrap();
	assert!(a.contains(a.get("X").unwrap()));
	assert!(!a.contains(b.get("X").unwrap()));
	assert_ne!(a.get("X"), b.get("X"));
}

#[test]
fn concurrent_finalize_closes_once() {
	let ty = EnumType::leak("Race");
	let results: Vec<bool> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..4).map(|_| s.spawn(|| ty.finalize(["A", "B"]).is_ok())).collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});
	assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
	assert_eq!(ty.len(), 2);
}

#[test]
fn lazy_type_cannot_be_assembled_by_hand() {
	static LAZY: EnumType = EnumType::lazy("Hand", || Members::names(["A"]));
	assert!(!LAZY.is_closed());
	assert!(matches!(LAZY.assemble(), Err(EnumError::Instantiation { .. })));
	assert_eq!(LAZY.names().collect::<Vec<_>>(), ["A"]);
}
