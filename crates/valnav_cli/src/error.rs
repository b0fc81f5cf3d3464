use std::path::PathBuf;

use thiserror::Error;
use valnav::nav::{NavError, ParseError};

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `valnav` commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input document could not be read.
	#[error("read {}: {source}", .path.display())]
	Read {
		/// Document path.
		path: PathBuf,
		/// Underlying IO failure.
		source: std::io::Error,
	},
	/// zstd stream could not be decoded.
	#[error("zstd: {0}")]
	Decompress(#[source] std::io::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed document exceeds {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum accepted decompressed size.
		limit: usize,
	},
	/// Document or output JSON failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Malformed path or pattern expression.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Path traversal failed.
	#[error(transparent)]
	Nav(#[from] NavError),
}
