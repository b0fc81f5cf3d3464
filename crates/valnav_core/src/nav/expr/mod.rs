//! Textual syntax for paths and patterns.
//!
//! Steps are separated by `/`:
//!
//! | Step | Meaning |
//! |---|---|
//! | `deref` | follow a pointer |
//! | `unwrap` | open an interface |
//! | `[N]` | sequence index |
//! | `.Name` | struct field |
//! | `key(LIT)` | map key itself |
//! | `value(LIT)` | value stored under a map key |
//! | `.*` | every exported field (patterns only) |
//! | `keys(*)` | every map key (patterns only) |
//! | `values(*)` | every map value (patterns only) |
//!
//! Literals are double-quoted strings, integers, floats, `true`, and `false`.

use thiserror::Error;

use crate::nav::{Element, PatternElement, Value};

/// Expression syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expression {expr:?} at byte {position}: {reason}")]
pub struct ParseError {
	/// Original expression text.
	pub expr: String,
	/// Byte offset of the failure.
	pub position: usize,
	/// What was expected or found.
	pub reason: &'static str,
}

impl ParseError {
	pub(crate) fn new(expr: &str, position: usize, reason: &'static str) -> Self {
		Self {
			expr: expr.to_owned(),
			position,
			reason,
		}
	}
}

/// One parsed step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
	Element(Element),
	Wildcard(PatternElement),
}

/// Parse an expression into steps paired with their byte offsets.
pub(crate) fn parse_steps(input: &str) -> Result<Vec<(usize, Step)>, ParseError> {
	let mut parser = Parser { input, pos: 0 };
	let mut steps = Vec::new();

	parser.skip_ws();
	if parser.at_end() {
		return Ok(steps);
	}

	loop {
		let start = parser.pos;
		steps.push((start, parser.step()?));
		parser.skip_ws();
		if parser.at_end() {
			return Ok(steps);
		}
		if !parser.eat("/") {
			return Err(parser.error("expected '/' between steps"));
		}
		parser.skip_ws();
		if parser.at_end() {
			return Err(parser.error("expected step after '/'"));
		}
	}
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
}

impl Parser<'_> {
	fn rest(&self) -> &str {
		&self.input[self.pos..]
	}

	fn at_end(&self) -> bool {
		self.pos >= self.input.len()
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.pos += ch.len_utf8();
		Some(ch)
	}

	fn eat(&mut self, token: &str) -> bool {
		if self.rest().starts_with(token) {
			self.pos += token.len();
			true
		} else {
			false
		}
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.bump();
		}
	}

	fn error(&self, reason: &'static str) -> ParseError {
		ParseError::new(self.input, self.pos, reason)
	}

	fn expect(&mut self, token: &str, reason: &'static str) -> Result<(), ParseError> {
		if self.eat(token) { Ok(()) } else { Err(self.error(reason)) }
	}

	fn eat_word(&mut self, word: &str) -> bool {
		let rest = self.rest();
		if !rest.starts_with(word) {
			return false;
		}
		let boundary = rest[word.len()..].chars().next().is_none_or(|ch| ch == '/' || ch.is_whitespace());
		if boundary {
			self.pos += word.len();
		}
		boundary
	}

	fn step(&mut self) -> Result<Step, ParseError> {
		if self.eat(".*") {
			return Ok(Step::Wildcard(PatternElement::AllExportedFields));
		}
		if self.eat(".") {
			return Ok(Step::Element(Element::field(self.ident()?)));
		}
		if self.eat("[") {
			self.skip_ws();
			let index = self.index()?;
			self.skip_ws();
			self.expect("]", "expected ']'")?;
			return Ok(Step::Element(Element::Index(index)));
		}
		if self.eat_word("deref") {
			return Ok(Step::Element(Element::Deref));
		}
		if self.eat_word("unwrap") {
			return Ok(Step::Element(Element::Unwrap));
		}
		if self.eat("keys(") {
			self.wildcard_arg()?;
			return Ok(Step::Wildcard(PatternElement::AllMapKeys));
		}
		if self.eat("values(") {
			self.wildcard_arg()?;
			return Ok(Step::Wildcard(PatternElement::AllMapValues));
		}
		if self.eat("key(") {
			return Ok(Step::Element(Element::MapKey(self.literal_arg()?)));
		}
		if self.eat("value(") {
			return Ok(Step::Element(Element::MapValueOfKey(self.literal_arg()?)));
		}
		Err(self.error("unknown step"))
	}

	fn ident(&mut self) -> Result<&str, ParseError> {
		let start = self.pos;
		while self.peek().is_some_and(|ch| ch.is_alphanumeric() || ch == '_') {
			self.bump();
		}
		if self.pos == start {
			return Err(self.error("expected field name"));
		}
		Ok(&self.input[start..self.pos])
	}

	fn index(&mut self) -> Result<isize, ParseError> {
		let start = self.pos;
		self.eat("-");
		while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
			self.bump();
		}
		self.input[start..self.pos]
			.parse::<isize>()
			.map_err(|_| ParseError::new(self.input, start, "expected integer index"))
	}

	fn wildcard_arg(&mut self) -> Result<(), ParseError> {
		self.skip_ws();
		self.expect("*", "expected '*'")?;
		self.skip_ws();
		self.expect(")", "expected ')'")
	}

	fn literal_arg(&mut self) -> Result<Value, ParseError> {
		self.skip_ws();
		let value = self.literal()?;
		self.skip_ws();
		self.expect(")", "expected ')'")?;
		Ok(value)
	}

	fn literal(&mut self) -> Result<Value, ParseError> {
		match self.peek() {
			Some('"') => self.string(),
			Some(ch) if ch == '-' || ch.is_ascii_digit() => self.number(),
			_ if self.eat("true") => Ok(Value::bool(true)),
			_ if self.eat("false") => Ok(Value::bool(false)),
			_ => Err(self.error("expected literal")),
		}
	}

	fn string(&mut self) -> Result<Value, ParseError> {
		let start = self.pos;
		self.bump();
		let mut out = String::new();
		loop {
			match self.bump() {
				Some('"') => return Ok(Value::string(&out)),
				Some('\\') => {
					let escaped = match self.bump() {
						Some('"') => '"',
						Some('\\') => '\\',
						Some('n') => '\n',
						Some('t') => '\t',
						_ => return Err(self.error("unknown escape")),
					};
					out.push(escaped);
				}
				Some(ch) => out.push(ch),
				None => return Err(ParseError::new(self.input, start, "unterminated string")),
			}
		}
	}

	fn number(&mut self) -> Result<Value, ParseError> {
		let start = self.pos;
		self.eat("-");
		while self.peek().is_some_and(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-')) {
			self.bump();
		}
		let text = &self.input[start..self.pos];
		let invalid = || ParseError::new(self.input, start, "invalid number");

		if text.contains(['.', 'e', 'E']) {
			return text.parse::<f64>().map(Value::float).map_err(|_| invalid());
		}
		if let Ok(value) = text.parse::<i64>() {
			return Ok(Value::int(value));
		}
		text.parse::<u64>().map(Value::uint).map_err(|_| invalid())
	}
}

#[cfg(test)]
mod tests;
