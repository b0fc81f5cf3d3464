use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::nav::test_support::{groups, int_sequence, outer, render_sorted, string_int_map};
use crate::nav::{Element, FieldDef, Path, Pattern, PatternElement, StructType, Type, Value};

#[test]
fn empty_pattern_matches_root() {
	let value = int_sequence(&[1, 2]);
	let matches: Vec<_> = Pattern::empty().matches(&value).collect();
	assert_eq!(matches.len(), 1);
	assert_eq!(matches[0].path, Path::empty());
	assert_eq!(matches[0].value, &value);
}

#[test]
fn invalid_root_matches_nothing() {
	assert_eq!(Pattern::empty().matches(&Value::Invalid).count(), 0);
	assert_eq!(Pattern::from(PatternElement::AllMapKeys).matches(&Value::Invalid).count(), 0);
}

#[test]
fn single_index_on_sequence() {
	let value = int_sequence(&[1, 2, 3]);
	let matches: Vec<_> = Pattern::from(Element::Index(0)).matches(&value).collect();
	assert_eq!(matches.len(), 1);
	assert_eq!(matches[0].path, Path::from(Element::Index(0)));
	assert_eq!(matches[0].value, &Value::int(1));
}

#[test]
fn wildcards_expand_as_cartesian_product() {
	let value = groups();
	let pattern = Pattern::new([PatternElement::AllExportedFields, PatternElement::AllMapValues]);
	assert_eq!(
		render_sorted(pattern.matches(&value)),
		vec![
			"<field A> / <map value of key \"x\"> => 1",
			"<field A> / <map value of key \"y\"> => 2",
			"<field B> / <map value of key \"x\"> => 3",
		]
	);
}

#[test]
fn exported_fields_then_map_keys_yield_every_key() {
	let value = groups();
	let pattern = Pattern::join([Pattern::from(PatternElement::AllExportedFields), Pattern::from(PatternElement::AllMapKeys)]);
	assert_eq!(
		render_sorted(pattern.matches(&value)),
		vec![
			"<field A> / <map key \"x\"> => \"x\"",
			"<field A> / <map key \"y\"> => \"y\"",
			"<field B> / <map key \"x\"> => \"x\"",
		]
	);
}

#[test]
fn non_matching_branches_are_pruned() {
	let ty = StructType::new(
		"Mixed",
		vec![FieldDef::new("Map", Type::map_of(Type::String, Type::Int)), FieldDef::new("Count", Type::Int)],
	);
	let value = Value::record(&ty, vec![string_int_map(&[("k", 9)]), Value::int(4)]);
	let pattern = Pattern::parse(".* / keys(*)").expect("valid pattern");
	assert_eq!(render_sorted(pattern.matches(&value)), vec!["<field Map> / <map key \"k\"> => \"k\""]);
}

#[test]
fn each_match_path_reaches_its_value() {
	let value = groups();
	let pattern = Pattern::parse(".* / values(*)").expect("valid pattern");
	for found in pattern.matches(&value) {
		assert_eq!(found.path.traverse(&value), Ok(found.value), "path {}", found.path);
	}
}

#[test]
fn path_steps_mix_with_wildcards() {
	let value = outer(8);
	let pattern = Pattern::new([PatternElement::from(Element::field("Inner")), PatternElement::AllExportedFields]);
	assert_eq!(render_sorted(pattern.matches(&value)), vec!["<field Inner> / <field Int> => 8"]);
}

#[test]
fn sorted_by_path_orders_results() {
	let value = string_int_map(&[("c", 3), ("a", 1), ("b", 2)]);
	let rendered: Vec<String> = Pattern::from(PatternElement::AllMapValues)
		.matches(&value)
		.sorted_by_path()
		.into_iter()
		.map(|found| found.value.to_string())
		.collect();
	assert_eq!(rendered, vec!["1", "2", "3"]);
}

#[test]
fn stream_can_stop_early() {
	let inner_ty = Type::map_of(Type::String, Type::Int);
	let value = Value::map(
		Type::String,
		inner_ty,
		(0..50).map(|n| (Value::string(&format!("k{n}")), string_int_map(&[("n", n), ("m", -n)]))),
	);
	let pattern = Pattern::parse("values(*) / values(*)").expect("valid pattern");
	assert_eq!(pattern.matches(&value).count(), 100);

	let first: Vec<_> = pattern.matches(&value).take(3).collect();
	assert_eq!(first.len(), 3);
	for found in first {
		assert_eq!(found.path.len(), 2);
	}
}

#[test]
fn join_flattens_patterns() {
	let a = Pattern::from(PatternElement::AllExportedFields);
	let b = Pattern::from(Element::Deref);
	let joined = Pattern::join([Some(a), None, Some(Pattern::empty()), Some(b)]);
	assert_eq!(joined.elements(), &[PatternElement::AllExportedFields, PatternElement::from(Element::Deref)]);
	assert_eq!(joined.to_string(), "<all exported fields> / <deref>");
	assert_eq!(Pattern::empty().to_string(), "<empty pattern>");
}

#[test]
fn parse_keeps_deterministic_steps_separate() {
	let pattern = Pattern::parse(".A / [0] / keys(*)").expect("valid pattern");
	assert_eq!(
		pattern.elements(),
		&[
			PatternElement::from(Element::field("A")),
			PatternElement::from(Element::Index(0)),
			PatternElement::AllMapKeys,
		]
	);
}

fn arb_pattern_element() -> impl Strategy<Value = PatternElement> {
	prop_oneof![
		Just(PatternElement::AllExportedFields),
		Just(PatternElement::AllMapKeys),
		Just(PatternElement::AllMapValues),
		Just(PatternElement::from(Element::Deref)),
		(0isize..4).prop_map(|index| PatternElement::from(Element::Index(index))),
		"[A-Z][a-z]{0,4}".prop_map(|name| PatternElement::from(Element::field(&name))),
	]
}

fn arb_pattern() -> impl Strategy<Value = Pattern> {
	prop::collection::vec(arb_pattern_element(), 0..6).prop_map(Pattern::new)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(128))]

	#[test]
	fn join_is_associative(a in arb_pattern(), b in arb_pattern(), c in arb_pattern()) {
		let left = Pattern::join([Pattern::join([a.clone(), b.clone()]), c.clone()]);
		let right = Pattern::join([a, Pattern::join([b, c])]);
		prop_assert_eq!(left, right);
	}

	#[test]
	fn join_ignores_none_and_empty(a in arb_pattern(), b in arb_pattern()) {
		let plain = Pattern::join([a.clone(), b.clone()]);
		let padded = Pattern::join([None, Some(a), Some(Pattern::empty()), None, Some(b)]);
		prop_assert_eq!(plain, padded);
	}

	#[test]
	fn matching_is_repeatable(pattern in arb_pattern()) {
		let value = groups();
		prop_assert_eq!(render_sorted(pattern.matches(&value)), render_sorted(pattern.matches(&value)));
	}
}
