use thiserror::Error;

use crate::nav::Kind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors produced while following a deterministic path through a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
	/// Traversal was attempted on an invalid (absent) value.
	#[error("invalid value")]
	InvalidValue,
	/// The step requires a different value kind.
	#[error("kind mismatch: expected {expected}, got {got}")]
	KindMismatch {
		/// Kind required by the step.
		expected: Kind,
		/// Kind of the value the step was applied to.
		got: Kind,
	},
	/// Sequence index outside `[0, len)`.
	#[error("index {index} out of range for length {len}")]
	OutOfRange {
		/// Requested index.
		index: isize,
		/// Sequence length.
		len: usize,
	},
	/// Dereference of a nil pointer, interface, or map.
	#[error("nil {kind} dereference")]
	NilDereference {
		/// Kind of the nil value.
		kind: Kind,
	},
	/// Map key is not present.
	#[error("map key not found: {key}")]
	KeyNotFound {
		/// Rendered key literal.
		key: String,
	},
	/// Key literal is not assignable to the map's key type.
	#[error("map key type mismatch: expected {expected}, got {got}")]
	KeyTypeMismatch {
		/// Declared map key type.
		expected: String,
		/// Type of the supplied key.
		got: String,
	},
	/// Struct has no field with the requested name.
	#[error("field {field} not found on {struct_name}")]
	FieldNotFound {
		/// Struct type name.
		struct_name: String,
		/// Requested field name.
		field: String,
	},
	/// Several promoted fields share the name at the shallowest depth.
	#[error("field {field} is ambiguous on {struct_name}")]
	AmbiguousField {
		/// Struct type name.
		struct_name: String,
		/// Requested field name.
		field: String,
	},
	/// Field exists but is not exported.
	#[error("field {field} on {struct_name} is not exported")]
	FieldNotExported {
		/// Struct type name.
		struct_name: String,
		/// Requested field name.
		field: String,
	},
	/// Promoted field sits behind a nil embedded pointer.
	#[error("field {field} on {struct_name} requires nil embedded pointer {embedded}")]
	NilEmbeddedPath {
		/// Struct type name.
		struct_name: String,
		/// Requested field name.
		field: String,
		/// Name of the nil embedded field.
		embedded: String,
	},
}

impl NavError {
	/// Whether the failure was caused by following a nil pointer, interface, or map.
	pub fn is_nil_dereference(&self) -> bool {
		matches!(self, Self::NilDereference { .. } | Self::NilEmbeddedPath { .. })
	}
}
