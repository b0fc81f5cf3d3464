use std::fmt;

use tracing::debug;

use crate::nav::expr::{Step, parse_steps};
use crate::nav::{Element, NavError, ParseError, Result, TraverseOptions, Value};

/// Ordered, flat sequence of deterministic navigation steps.
///
/// Paths never nest: [`Path::join`] splices the elements of its operands into one sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
	elements: Vec<Element>,
}

impl Path {
	/// The empty path, identity for traversal and [`Path::join`].
	pub fn empty() -> Self {
		Self::default()
	}

	/// Path made of `elements` in order.
	pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
		Self {
			elements: elements.into_iter().collect(),
		}
	}

	/// Concatenate paths, skipping `None` parts.
	pub fn join<P: Into<Option<Path>>>(parts: impl IntoIterator<Item = P>) -> Self {
		let elements = parts.into_iter().filter_map(Into::<Option<Path>>::into).flat_map(|part| part.elements).collect();
		Self { elements }
	}

	/// Parse path expression syntax, e.g. `.Items / [0] / value("id")`.
	pub fn parse(input: &str) -> std::result::Result<Self, ParseError> {
		let mut elements = Vec::new();
		for (position, step) in parse_steps(input)? {
			match step {
				Step::Element(element) => elements.push(element),
				Step::Wildcard(_) => return Err(ParseError::new(input, position, "wildcards are not allowed in a path")),
			}
		}
		Ok(Self { elements })
	}

	/// Steps in order.
	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	/// Number of steps.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Whether this is the empty path.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Iterate steps in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Element> {
		self.elements.iter()
	}

	/// Follow the path with default options.
	pub fn traverse<'v>(&self, value: &'v Value) -> Result<&'v Value> {
		self.traverse_with(value, &TraverseOptions::default())
	}

	/// Follow the path, stopping at the first failing step.
	pub fn traverse_with<'v>(&self, value: &'v Value, options: &TraverseOptions) -> Result<&'v Value> {
		if !value.is_valid() {
			return Err(NavError::InvalidValue);
		}

		let mut current = value;
		for (step, element) in self.elements.iter().enumerate() {
			current = element
				.traverse_with(current, options)
				.inspect_err(|err| debug!(step, element = %element, error = %err, "path traversal stopped"))?;
		}
		Ok(current)
	}
}

impl From<Element> for Path {
	fn from(element: Element) -> Self {
		Self { elements: vec![element] }
	}
}

impl FromIterator<Element> for Path {
	fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl<'a> IntoIterator for &'a Path {
	type Item = &'a Element;
	type IntoIter = std::slice::Iter<'a, Element>;

	fn into_iter(self) -> Self::IntoIter {
		self.elements.iter()
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.elements.is_empty() {
			return f.write_str("<empty path>");
		}
		for (idx, element) in self.elements.iter().enumerate() {
			if idx > 0 {
				f.write_str(" / ")?;
			}
			write!(f, "{element}")?;
		}
		Ok(())
	}
}
