use std::fmt;

use crate::nav::{Result, TraverseOptions, Value};

/// One deterministic navigation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
	/// Follow a non-nil pointer.
	Deref,
	/// Open a non-nil interface to its concrete value.
	Unwrap,
	/// Select a sequence element by zero-based index.
	Index(isize),
	/// Select a map key itself.
	MapKey(Value),
	/// Select the value stored under a map key.
	MapValueOfKey(Value),
	/// Select an exported struct field, possibly promoted from an embedded struct.
	Field(Box<str>),
}

impl Element {
	/// Field step for `name`.
	pub fn field(name: &str) -> Self {
		Self::Field(name.into())
	}

	/// Apply the step with default options.
	pub fn traverse<'v>(&self, value: &'v Value) -> Result<&'v Value> {
		self.traverse_with(value, &TraverseOptions::default())
	}

	/// Apply the step.
	pub fn traverse_with<'v>(&self, value: &'v Value, options: &TraverseOptions) -> Result<&'v Value> {
		match self {
			Self::Deref => value.dereference(),
			Self::Unwrap => value.unwrap_interface(),
			Self::Index(index) => value.element_at(*index),
			Self::MapKey(key) => value.map_entry(key).map(|entry| &entry.key),
			Self::MapValueOfKey(key) => value.map_entry(key).map(|entry| &entry.value),
			Self::Field(name) => value.field_by_name(name, options),
		}
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Deref => f.write_str("<deref>"),
			Self::Unwrap => f.write_str("<unwrap>"),
			Self::Index(index) => write!(f, "<index {index}>"),
			Self::MapKey(key) => write!(f, "<map key {key}>"),
			Self::MapValueOfKey(key) => write!(f, "<map value of key {key}>"),
			Self::Field(name) => write!(f, "<field {name}>"),
		}
	}
}
