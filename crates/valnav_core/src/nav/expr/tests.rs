use pretty_assertions::assert_eq;

use super::{ParseError, Step, parse_steps};
use crate::nav::{Element, PatternElement, Value};

fn steps(input: &str) -> Vec<Step> {
	parse_steps(input).expect("valid expression").into_iter().map(|(_, step)| step).collect()
}

fn failure(input: &str) -> (usize, &'static str) {
	let err = parse_steps(input).expect_err("invalid expression");
	(err.position, err.reason)
}

#[test]
fn parses_deterministic_steps() {
	assert_eq!(
		steps(".Name/[ 2 ]/deref/unwrap"),
		vec![
			Step::Element(Element::field("Name")),
			Step::Element(Element::Index(2)),
			Step::Element(Element::Deref),
			Step::Element(Element::Unwrap),
		]
	);
}

#[test]
fn parses_wildcards() {
	assert_eq!(
		steps(".* / keys(*) / values( * )"),
		vec![
			Step::Wildcard(PatternElement::AllExportedFields),
			Step::Wildcard(PatternElement::AllMapKeys),
			Step::Wildcard(PatternElement::AllMapValues),
		]
	);
}

#[test]
fn parses_literals() {
	assert_eq!(
		steps(r#"key("a \"b\"\n") / value(-12) / value(18446744073709551615) / key(1.5) / value(true) / key(false)"#),
		vec![
			Step::Element(Element::MapKey(Value::string("a \"b\"\n"))),
			Step::Element(Element::MapValueOfKey(Value::int(-12))),
			Step::Element(Element::MapValueOfKey(Value::uint(u64::MAX))),
			Step::Element(Element::MapKey(Value::float(1.5))),
			Step::Element(Element::MapValueOfKey(Value::bool(true))),
			Step::Element(Element::MapKey(Value::bool(false))),
		]
	);
}

#[test]
fn records_step_offsets() {
	let offsets: Vec<usize> = parse_steps(".A / [0]").expect("valid expression").into_iter().map(|(pos, _)| pos).collect();
	assert_eq!(offsets, vec![0, 5]);
}

#[test]
fn blank_input_has_no_steps() {
	assert_eq!(steps(""), Vec::new());
	assert_eq!(steps("   "), Vec::new());
}

#[test]
fn keywords_need_a_boundary() {
	assert_eq!(failure("derefx"), (0, "unknown step"));
	assert_eq!(steps("deref / unwrap"), vec![Step::Element(Element::Deref), Step::Element(Element::Unwrap)]);
}

#[test]
fn reports_malformed_input() {
	assert_eq!(failure(".A .B"), (3, "expected '/' between steps"));
	assert_eq!(failure(".A /"), (4, "expected step after '/'"));
	assert_eq!(failure("."), (1, "expected field name"));
	assert_eq!(failure("[x]"), (1, "expected integer index"));
	assert_eq!(failure("[1"), (2, "expected ']'"));
	assert_eq!(failure("keys(a)"), (5, "expected '*'"));
	assert_eq!(failure("key(\"a"), (4, "unterminated string"));
	assert_eq!(failure("key(\"\\q\")"), (7, "unknown escape"));
	assert_eq!(failure("value(nope)"), (6, "expected literal"));
	assert_eq!(failure("key(1.2.3)"), (4, "invalid number"));
	assert_eq!(failure("value(1"), (7, "expected ')'"));
}

#[test]
fn error_message_names_expression_and_offset() {
	let err = ParseError::new(".A .B", 3, "expected '/' between steps");
	assert_eq!(err.to_string(), "invalid expression \".A .B\" at byte 3: expected '/' between steps");
}
