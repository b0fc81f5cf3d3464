mod element;
mod error;
mod expr;
mod fields;
mod options;
mod path;
mod pattern;
mod pattern_element;
mod value;

#[cfg(test)]
mod test_support;

/// One deterministic navigation step.
pub use element::Element;
/// Error and result aliases.
pub use error::{NavError, Result};
/// Expression syntax errors.
pub use expr::ParseError;
/// Traversal policy.
pub use options::TraverseOptions;
/// Ordered deterministic navigation route.
pub use path::Path;
/// Wildcard route template and its lazy match stream.
pub use pattern::{Matches, Pattern};
/// Single-step pattern matching.
pub use pattern_element::{ElementMatches, Match, PatternElement};
/// Typed dynamic value representation.
pub use value::{FieldDef, Kind, MapEntry, MapValue, PointerValue, SequenceValue, StructType, StructValue, Type, Value};
