use std::fmt;

use crate::nav::{Element, MapEntry, Path, TraverseOptions, Value};

/// One concrete route from the matched root and the sub-value it reaches.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'v> {
	/// Concrete path from the root.
	pub path: Path,
	/// Value the path reaches.
	pub value: &'v Value,
}

/// One pattern step that may match zero, one, or many sub-values.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
	/// Deterministic path lifted to a single-match step.
	Path(Path),
	/// Every visible exported struct field, promoted fields included.
	AllExportedFields,
	/// Every key of a non-nil map.
	AllMapKeys,
	/// Every value of a non-nil map.
	AllMapValues,
}

impl PatternElement {
	/// Match one step with default options.
	pub fn matches<'v>(&self, value: &'v Value) -> ElementMatches<'v> {
		self.matches_with(value, &TraverseOptions::default())
	}

	/// Match one step. Unmet preconditions produce no matches rather than errors.
	///
	/// Map wildcards enumerate entries in no guaranteed order.
	pub fn matches_with<'v>(&self, value: &'v Value, options: &TraverseOptions) -> ElementMatches<'v> {
		let state = match self {
			Self::Path(path) => match path.traverse_with(value, options) {
				Ok(found) => MatchState::Single(Some(Match {
					path: path.clone(),
					value: found,
				})),
				Err(_) => MatchState::Done,
			},
			Self::AllExportedFields => match value {
				Value::Struct(item) => MatchState::Fields(item.exported_fields(options).into_iter()),
				_ => MatchState::Done,
			},
			Self::AllMapKeys => match value.map_entries() {
				Ok(entries) => MatchState::Keys(entries.iter()),
				Err(_) => MatchState::Done,
			},
			Self::AllMapValues => match value.map_entries() {
				Ok(entries) => MatchState::Values(entries.iter()),
				Err(_) => MatchState::Done,
			},
		};
		ElementMatches { state }
	}
}

impl From<Path> for PatternElement {
	fn from(path: Path) -> Self {
		Self::Path(path)
	}
}

impl From<Element> for PatternElement {
	fn from(element: Element) -> Self {
		Self::Path(Path::from(element))
	}
}

impl fmt::Display for PatternElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Path(path) => write!(f, "{path}"),
			Self::AllExportedFields => f.write_str("<all exported fields>"),
			Self::AllMapKeys => f.write_str("<all map keys>"),
			Self::AllMapValues => f.write_str("<all map values>"),
		}
	}
}

/// Lazy matches of a single pattern step.
#[derive(Debug)]
pub struct ElementMatches<'v> {
	state: MatchState<'v>,
}

#[derive(Debug)]
enum MatchState<'v> {
	Done,
	Single(Option<Match<'v>>),
	Fields(std::vec::IntoIter<(&'v str, &'v Value)>),
	Keys(std::slice::Iter<'v, MapEntry>),
	Values(std::slice::Iter<'v, MapEntry>),
}

impl<'v> Iterator for ElementMatches<'v> {
	type Item = Match<'v>;

	fn next(&mut self) -> Option<Self::Item> {
		match &mut self.state {
			MatchState::Done => None,
			MatchState::Single(item) => item.take(),
			MatchState::Fields(fields) => fields.next().map(|(name, value)| Match {
				path: Element::field(name).into(),
				value,
			}),
			MatchState::Keys(entries) => entries.next().map(|entry| Match {
				path: Element::MapKey(entry.key.clone()).into(),
				value: &entry.key,
			}),
			MatchState::Values(entries) => entries.next().map(|entry| Match {
				path: Element::MapValueOfKey(entry.key.clone()).into(),
				value: &entry.value,
			}),
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = match &self.state {
			MatchState::Done => 0,
			MatchState::Single(item) => usize::from(item.is_some()),
			MatchState::Fields(fields) => fields.len(),
			MatchState::Keys(entries) | MatchState::Values(entries) => entries.len(),
		};
		(len, Some(len))
	}
}

impl ExactSizeIterator for ElementMatches<'_> {}
