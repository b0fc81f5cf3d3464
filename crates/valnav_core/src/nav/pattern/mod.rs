use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use crate::nav::expr::{Step, parse_steps};
use crate::nav::{Element, Match, ParseError, Path, PatternElement, TraverseOptions, Value};

/// Ordered, flat sequence of pattern steps.
///
/// Matching expands a frontier of `(path so far, value)` entries through each step in turn, so
/// `.* / keys(*)` yields every key of every exported field that is itself a map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
	elements: Vec<PatternElement>,
}

impl Pattern {
	/// The empty pattern; matching it yields the root under the empty path.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Pattern made of `elements` in order.
	pub fn new(elements: impl IntoIterator<Item = PatternElement>) -> Self {
		Self {
			elements: elements.into_iter().collect(),
		}
	}

	/// Concatenate patterns, skipping `None` parts.
	pub fn join<P: Into<Option<Pattern>>>(parts: impl IntoIterator<Item = P>) -> Self {
		let elements = parts
			.into_iter()
			.filter_map(Into::<Option<Pattern>>::into)
			.flat_map(|part| part.elements)
			.collect();
		Self { elements }
	}

	/// Parse pattern expression syntax, e.g. `.* / keys(*)`.
	pub fn parse(input: &str) -> Result<Self, ParseError> {
		let elements = parse_steps(input)?
			.into_iter()
			.map(|(_, step)| match step {
				Step::Element(element) => PatternElement::from(element),
				Step::Wildcard(wildcard) => wildcard,
			})
			.collect();
		Ok(Self { elements })
	}

	/// Steps in order.
	pub fn elements(&self) -> &[PatternElement] {
		&self.elements
	}

	/// Number of steps.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Whether this is the empty pattern.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Match with default options.
	pub fn matches<'p, 'v>(&'p self, value: &'v Value) -> Matches<'p, 'v> {
		self.matches_with(value, &TraverseOptions::default())
	}

	/// Lazily enumerate every concrete path matching the pattern.
	///
	/// Result order is unspecified; sort by rendered path when a canonical order is needed.
	pub fn matches_with<'p, 'v>(&'p self, value: &'v Value, options: &TraverseOptions) -> Matches<'p, 'v> {
		let mut frontier = VecDeque::new();
		if value.is_valid() {
			frontier.push_back(FrontierEntry {
				depth: 0,
				path: Path::empty(),
				value,
			});
		}
		Matches {
			elements: &self.elements,
			options: *options,
			frontier,
		}
	}
}

impl From<PatternElement> for Pattern {
	fn from(element: PatternElement) -> Self {
		Self { elements: vec![element] }
	}
}

impl From<Path> for Pattern {
	fn from(path: Path) -> Self {
		PatternElement::Path(path).into()
	}
}

impl From<Element> for Pattern {
	fn from(element: Element) -> Self {
		PatternElement::from(element).into()
	}
}

impl FromIterator<PatternElement> for Pattern {
	fn from_iter<I: IntoIterator<Item = PatternElement>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.elements.is_empty() {
			return f.write_str("<empty pattern>");
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

#[derive(Debug)]
struct FrontierEntry<'v> {
	depth: usize,
	path: Path,
	value: &'v Value,
}

/// Lazy stream of pattern matches.
///
/// Entries leave the frontier in breadth-first order; entries that have passed every step are
/// yielded. Dropping the iterator abandons the remaining work.
#[derive(Debug)]
pub struct Matches<'p, 'v> {
	elements: &'p [PatternElement],
	options: TraverseOptions,
	frontier: VecDeque<FrontierEntry<'v>>,
}

impl<'v> Matches<'_, 'v> {
	/// Drain the stream and order matches by rendered path.
	pub fn sorted_by_path(self) -> Vec<Match<'v>> {
		let mut out: Vec<(String, Match<'v>)> = self.map(|item| (item.path.to_string(), item)).collect();
		out.sort_by(|a, b| a.0.cmp(&b.0));
		out.into_iter().map(|(_, item)| item).collect()
	}
}

impl<'v> Iterator for Matches<'_, 'v> {
	type Item = Match<'v>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(entry) = self.frontier.pop_front() {
			let Some(element) = self.elements.get(entry.depth) else {
				return Some(Match {
					path: entry.path,
					value: entry.value,
				});
			};

			let before = self.frontier.len();
			for found in element.matches_with(entry.value, &self.options) {
				self.frontier.push_back(FrontierEntry {
					depth: entry.depth + 1,
					path: Path::join([entry.path.clone(), found.path]),
					value: found.value,
				});
			}
			trace!(
				depth = entry.depth,
				element = %element,
				produced = self.frontier.len() - before,
				"expanded frontier entry"
			);
		}
		None
	}
}

#[cfg(test)]
mod tests;
