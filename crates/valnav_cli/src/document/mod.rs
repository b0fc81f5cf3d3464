//! JSON input documents and their mapping onto the navigable value model.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};
use tracing::debug;
use valnav::nav::{Type, Value};

use crate::error::{CliError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic.
pub(crate) const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compression {
	/// Plain JSON text.
	None,
	/// zstd-compressed JSON text.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Read, decompress and convert a JSON document.
pub(crate) fn load(path: &Path) -> Result<Value> {
	let raw = fs::read(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	let (compression, bytes) = decode_bytes(raw)?;
	debug!(path = %path.display(), compression = compression.as_str(), bytes = bytes.len(), "loaded document");

	let json: JsonValue = serde_json::from_slice(&bytes)?;
	Ok(from_json(&json))
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub(crate) fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw).map_err(CliError::Decompress)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf).map_err(CliError::Decompress)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(CliError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

/// Convert parsed JSON into a value tree.
///
/// Arrays become `[]interface` sequences and objects become `map[string]interface` maps in
/// document order, so nested values sit behind an `unwrap` step. `null` is a nil interface.
pub(crate) fn from_json(json: &JsonValue) -> Value {
	match json {
		JsonValue::Null => Value::nil_interface(),
		JsonValue::Bool(value) => Value::bool(*value),
		JsonValue::Number(number) => {
			if let Some(value) = number.as_i64() {
				Value::int(value)
			} else if let Some(value) = number.as_u64() {
				Value::uint(value)
			} else {
				Value::float(number.as_f64().unwrap_or(f64::NAN))
			}
		}
		JsonValue::String(value) => Value::string(value),
		JsonValue::Array(items) => Value::sequence(Type::Interface, items.iter().map(boxed).collect()),
		JsonValue::Object(fields) => Value::map(
			Type::String,
			Type::Interface,
			fields.iter().map(|(key, value)| (Value::string(key), boxed(value))),
		),
	}
}

fn boxed(json: &JsonValue) -> Value {
	match json {
		JsonValue::Null => Value::nil_interface(),
		other => Value::interface(from_json(other)),
	}
}

/// Render a value tree as JSON output.
///
/// Pointers and interfaces are transparent, nil renders as `null`, structs become objects keyed
/// by field name, and maps with non-string keys become arrays of `[key, value]` pairs.
pub(crate) fn to_json(value: &Value) -> JsonValue {
	match value {
		Value::Invalid => JsonValue::Null,
		Value::Bool(value) => serde_json::json!(value),
		Value::Int(value) => serde_json::json!(value),
		Value::Uint(value) => serde_json::json!(value),
		Value::Float(value) => serde_json::json!(value),
		Value::String(value) => serde_json::json!(value.as_ref()),
		Value::Bytes(value) => JsonValue::Array(value.iter().map(|byte| serde_json::json!(byte)).collect()),
		Value::Pointer(item) => item.target.as_deref().map_or(JsonValue::Null, to_json),
		Value::Interface(inner) => inner.as_deref().map_or(JsonValue::Null, to_json),
		Value::Sequence(item) => JsonValue::Array(item.items.iter().map(to_json).collect()),
		Value::Map(item) => {
			let Some(entries) = &item.entries else {
				return JsonValue::Null;
			};
			if entries.iter().all(|entry| matches!(entry.key, Value::String(_))) {
				let fields: Map<String, JsonValue> = entries
					.iter()
					.filter_map(|entry| match &entry.key {
						Value::String(key) => Some((key.to_string(), to_json(&entry.value))),
						_ => None,
					})
					.collect();
				JsonValue::Object(fields)
			} else {
				JsonValue::Array(
					entries
						.iter()
						.map(|entry| JsonValue::Array(vec![to_json(&entry.key), to_json(&entry.value)]))
						.collect(),
				)
			}
		}
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.ty
				.fields
				.iter()
				.zip(&item.fields)
				.map(|(def, value)| (def.name.to_string(), to_json(value)))
				.collect();
			JsonValue::Object(fields)
		}
	}
}
