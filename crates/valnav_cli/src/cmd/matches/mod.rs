use std::path::PathBuf;

use tracing::debug;
use valnav::nav::{Match, Pattern, Value};

use crate::cmd::emit_json;
use crate::document;
use crate::error::Result;

/// Arguments of `valnav match`.
pub struct MatchArgs {
	/// Input document.
	pub path: PathBuf,
	/// Pattern expression.
	pub expr: String,
	/// Emit JSON instead of text.
	pub json: bool,
	/// Order matches by rendered path.
	pub sort: bool,
	/// Stop after this many matches.
	pub limit: Option<usize>,
}

/// Enumerate matches of the pattern expression and print them.
pub fn run(args: &MatchArgs) -> Result<()> {
	let pattern = Pattern::parse(&args.expr)?;
	let root = document::load(&args.path)?;
	debug!(steps = pattern.len(), "parsed pattern");

	let found = collect_matches(&pattern, &root, args);

	if args.json {
		return emit_json(&MatchJson {
			file: args.path.display().to_string(),
			pattern: pattern.to_string(),
			count: found.len(),
			matches: found
				.iter()
				.map(|item| MatchRowJson {
					path: item.path.to_string(),
					value: document::to_json(item.value),
				})
				.collect(),
		});
	}

	for line in render_lines(&found) {
		println!("{line}");
	}
	println!("matches: {}", found.len());
	Ok(())
}

/// Consume the lazy match stream, honoring `--limit` before `--sort`.
pub(crate) fn collect_matches<'v>(pattern: &Pattern, root: &'v Value, args: &MatchArgs) -> Vec<Match<'v>> {
	let stream = pattern.matches(root);
	match (args.limit, args.sort) {
		(None, true) => stream.sorted_by_path(),
		(None, false) => stream.collect(),
		(Some(limit), sort) => {
			let mut found: Vec<Match<'v>> = stream.take(limit).collect();
			if sort {
				found.sort_by_cached_key(|item| item.path.to_string());
			}
			found
		}
	}
}

/// Text rows: `PATH = VALUE`.
pub(crate) fn render_lines(found: &[Match<'_>]) -> Vec<String> {
	found.iter().map(|item| format!("{} = {}", item.path, item.value)).collect()
}

#[derive(serde::Serialize)]
struct MatchJson {
	file: String,
	pattern: String,
	count: usize,
	matches: Vec<MatchRowJson>,
}

#[derive(serde::Serialize)]
struct MatchRowJson {
	path: String,
	value: serde_json::Value,
}
