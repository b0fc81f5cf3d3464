use std::sync::Arc;

use crate::nav::{FieldDef, Match, StructType, Type, Value};

/// `Inner { Int int }`.
pub(crate) fn inner_type() -> Arc<StructType> {
	StructType::new("Inner", vec![FieldDef::new("Int", Type::Int)])
}

/// `Outer { Inner }`, embedding `Inner` by value.
pub(crate) fn outer_type() -> Arc<StructType> {
	StructType::new("Outer", vec![FieldDef::embed(Type::Struct(inner_type()))])
}

/// `OuterPtr { *Inner }`, embedding `Inner` by pointer.
pub(crate) fn outer_ptr_type() -> Arc<StructType> {
	StructType::new("OuterPtr", vec![FieldDef::embed(Type::pointer_to(Type::Struct(inner_type())))])
}

pub(crate) fn inner(int: i64) -> Value {
	Value::record(&inner_type(), vec![Value::int(int)])
}

pub(crate) fn outer(int: i64) -> Value {
	Value::record(&outer_type(), vec![inner(int)])
}

pub(crate) fn outer_ptr(int: Option<i64>) -> Value {
	let embedded = match int {
		Some(int) => Value::pointer_to(inner(int)),
		None => Value::nil_pointer(Type::Struct(inner_type())),
	};
	Value::record(&outer_ptr_type(), vec![embedded])
}

/// `Pair { Int int, String string }`.
pub(crate) fn pair_type() -> Arc<StructType> {
	StructType::new("Pair", vec![FieldDef::new("Int", Type::Int), FieldDef::new("String", Type::String)])
}

pub(crate) fn pair(int: i64, string: &str) -> Value {
	Value::record(&pair_type(), vec![Value::int(int), Value::string(string)])
}

/// `Account { Name string, secret string }` with one unexported field.
pub(crate) fn account(name: &str, secret: &str) -> Value {
	let ty = StructType::new(
		"Account",
		vec![FieldDef::new("Name", Type::String), FieldDef::new("secret", Type::String).unexported()],
	);
	Value::record(&ty, vec![Value::string(name), Value::string(secret)])
}

pub(crate) fn string_int_map(entries: &[(&str, i64)]) -> Value {
	Value::map(
		Type::String,
		Type::Int,
		entries.iter().map(|(key, value)| (Value::string(key), Value::int(*value))),
	)
}

pub(crate) fn int_sequence(items: &[i64]) -> Value {
	Value::sequence(Type::Int, items.iter().copied().map(Value::int).collect())
}

/// `Groups { A map[string]int, B map[string]int }` holding `{x:1, y:2}` and `{x:3}`.
pub(crate) fn groups() -> Value {
	let map_ty = Type::map_of(Type::String, Type::Int);
	let ty = StructType::new("Groups", vec![FieldDef::new("A", map_ty.clone()), FieldDef::new("B", map_ty)]);
	Value::record(&ty, vec![string_int_map(&[("x", 1), ("y", 2)]), string_int_map(&[("x", 3)])])
}

/// Render matches as sorted `path => value` lines for order-insensitive comparison.
pub(crate) fn render_sorted<'v>(matches: impl IntoIterator<Item = Match<'v>>) -> Vec<String> {
	let mut out: Vec<String> = matches.into_iter().map(|item| format!("{} => {}", item.path, item.value)).collect();
	out.sort();
	out
}
