/// Policy knobs shared by path traversal and pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraverseOptions {
	/// Resolve field names promoted through embedded structs.
	///
	/// When disabled, `Field(name)` only sees fields declared directly on the struct and
	/// `AllExportedFields` lists only those, so every field has exactly one address.
	pub allow_promoted_fields: bool,
}

impl Default for TraverseOptions {
	fn default() -> Self {
		Self { allow_promoted_fields: true }
	}
}

impl TraverseOptions {
	/// Preset that addresses every field only through its declaring struct.
	pub fn direct_fields_only() -> Self {
		Self {
			allow_promoted_fields: false,
		}
	}
}
