use std::path::PathBuf;

use tracing::debug;
use valnav::nav::Path;

use crate::cmd::emit_json;
use crate::document;
use crate::error::Result;

/// Arguments of `valnav traverse`.
pub struct TraverseArgs {
	/// Input document.
	pub path: PathBuf,
	/// Path expression.
	pub expr: String,
	/// Emit JSON instead of text.
	pub json: bool,
}

/// Follow the path expression and print the value it reaches.
pub fn run(args: &TraverseArgs) -> Result<()> {
	let path = Path::parse(&args.expr)?;
	let root = document::load(&args.path)?;
	debug!(steps = path.len(), "parsed path");

	let value = path.traverse(&root)?;

	if args.json {
		return emit_json(&TraverseJson {
			file: args.path.display().to_string(),
			path: path.to_string(),
			value: document::to_json(value),
		});
	}

	println!("path: {path}");
	println!("value: {value}");
	Ok(())
}

#[derive(serde::Serialize)]
struct TraverseJson {
	file: String,
	path: String,
	value: serde_json::Value,
}
