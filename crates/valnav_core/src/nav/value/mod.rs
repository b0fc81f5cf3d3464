use std::fmt;
use std::sync::Arc;

use crate::nav::fields::{FieldLookup, field_by_index, lookup_field, visible_fields};
use crate::nav::{NavError, Result, TraverseOptions};

/// Coarse shape classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Booleans, numbers, strings, and byte strings.
	Scalar,
	/// Possibly-nil pointer to one value.
	Pointer,
	/// Possibly-nil polymorphic box around a concrete value.
	Interface,
	/// Ordered indexed elements.
	Sequence,
	/// Keyed entries.
	Map,
	/// Record with named fields.
	Struct,
}

impl Kind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scalar => "scalar",
			Self::Pointer => "pointer",
			Self::Interface => "interface",
			Self::Sequence => "sequence",
			Self::Map => "map",
			Self::Struct => "struct",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Static type of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
	/// Boolean scalar.
	Bool,
	/// Signed integer scalar.
	Int,
	/// Unsigned integer scalar.
	Uint,
	/// Floating point scalar.
	Float,
	/// UTF-8 string scalar.
	String,
	/// Raw byte string scalar.
	Bytes,
	/// Pointer to the inner type.
	Pointer(Box<Type>),
	/// Polymorphic type; any value is assignable to it.
	Interface,
	/// Sequence of the inner type.
	Sequence(Box<Type>),
	/// Map from key type to value type.
	Map {
		/// Declared key type.
		key: Box<Type>,
		/// Declared value type.
		value: Box<Type>,
	},
	/// Named record type.
	Struct(Arc<StructType>),
}

impl Type {
	/// Pointer type to `inner`.
	pub fn pointer_to(inner: Type) -> Self {
		Self::Pointer(Box::new(inner))
	}

	/// Sequence type of `elem`.
	pub fn sequence_of(elem: Type) -> Self {
		Self::Sequence(Box::new(elem))
	}

	/// Map type from `key` to `value`.
	pub fn map_of(key: Type, value: Type) -> Self {
		Self::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// Kind of values of this type.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Bool | Self::Int | Self::Uint | Self::Float | Self::String | Self::Bytes => Kind::Scalar,
			Self::Pointer(_) => Kind::Pointer,
			Self::Interface => Kind::Interface,
			Self::Sequence(_) => Kind::Sequence,
			Self::Map { .. } => Kind::Map,
			Self::Struct(_) => Kind::Struct,
		}
	}

	/// Struct type reached by an embedded field of this type, by value or by pointer.
	pub fn embedded_struct(&self) -> Option<&Arc<StructType>> {
		match self {
			Self::Struct(item) => Some(item),
			Self::Pointer(inner) => match inner.as_ref() {
				Self::Struct(item) => Some(item),
				_ => None,
			},
			_ => None,
		}
	}

	/// Whether a value of this type may be used where `target` is expected.
	pub fn is_assignable_to(&self, target: &Type) -> bool {
		*target == Self::Interface || self == target
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool => f.write_str("bool"),
			Self::Int => f.write_str("int"),
			Self::Uint => f.write_str("uint"),
			Self::Float => f.write_str("float"),
			Self::String => f.write_str("string"),
			Self::Bytes => f.write_str("bytes"),
			Self::Pointer(inner) => write!(f, "*{inner}"),
			Self::Interface => f.write_str("interface"),
			Self::Sequence(elem) => write!(f, "[]{elem}"),
			Self::Map { key, value } => write!(f, "map[{key}]{value}"),
			Self::Struct(item) => f.write_str(&item.name),
		}
	}
}

/// Named record type with ordered field declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
	/// Type name.
	pub name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldDef>,
}

impl StructType {
	/// Build a shareable struct type.
	pub fn new(name: &str, fields: Vec<FieldDef>) -> Arc<Self> {
		Arc::new(Self { name: name.into(), fields })
	}
}

/// One declared struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
	/// Field name; embedded fields are named after their struct type.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: Type,
	/// Whether the field is visible to navigation.
	pub exported: bool,
	/// Whether the field embeds a struct (by value or pointer) and promotes its fields.
	pub embedded: bool,
}

impl FieldDef {
	/// Exported, non-embedded field.
	pub fn new(name: &str, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			exported: true,
			embedded: false,
		}
	}

	/// Exported embedded field named after the embedded struct type.
	pub fn embed(ty: Type) -> Self {
		let name = match ty.embedded_struct() {
			Some(item) => item.name.clone(),
			None => ty.to_string().into(),
		};
		Self {
			name,
			ty,
			exported: true,
			embedded: true,
		}
	}

	/// Mark the field as not exported.
	pub fn unexported(mut self) -> Self {
		self.exported = false;
		self
	}
}

/// Typed dynamic value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absent value; every navigation step fails on it.
	#[default]
	Invalid,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// Unsigned integer scalar.
	Uint(u64),
	/// Floating point scalar.
	Float(f64),
	/// UTF-8 string scalar.
	String(Box<str>),
	/// Raw byte string scalar.
	Bytes(Vec<u8>),
	/// Possibly-nil pointer.
	Pointer(PointerValue),
	/// Possibly-nil polymorphic box.
	Interface(Option<Box<Value>>),
	/// Ordered elements.
	Sequence(SequenceValue),
	/// Keyed entries.
	Map(MapValue),
	/// Record instance.
	Struct(StructValue),
}

/// Pointer payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerValue {
	/// Pointed-to type, known even when the pointer is nil.
	pub pointee: Type,
	/// Target value, `None` when nil.
	pub target: Option<Box<Value>>,
}

/// Sequence payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceValue {
	/// Declared element type.
	pub elem: Type,
	/// Elements in index order.
	pub items: Vec<Value>,
}

/// Map payload.
///
/// Entries keep insertion order, but navigation never promises any particular order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
	/// Declared key type.
	pub key: Type,
	/// Declared value type.
	pub value: Type,
	/// Entries, `None` when the map is nil.
	pub entries: Option<Vec<MapEntry>>,
}

/// One key/value pair of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
	/// Concrete key.
	pub key: Value,
	/// Stored value.
	pub value: Value,
}

/// Struct payload; `fields` line up with `ty.fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Struct type descriptor.
	pub ty: Arc<StructType>,
	/// Field values in declaration order.
	pub fields: Vec<Value>,
}

impl Value {
	/// Boolean scalar.
	pub fn bool(value: bool) -> Self {
		Self::Bool(value)
	}

	/// Signed integer scalar.
	pub fn int(value: i64) -> Self {
		Self::Int(value)
	}

	/// Unsigned integer scalar.
	pub fn uint(value: u64) -> Self {
		Self::Uint(value)
	}

	/// Floating point scalar.
	pub fn float(value: f64) -> Self {
		Self::Float(value)
	}

	/// String scalar.
	pub fn string(value: &str) -> Self {
		Self::String(value.into())
	}

	/// Non-nil pointer to `target`.
	pub fn pointer_to(target: Value) -> Self {
		Self::Pointer(PointerValue {
			pointee: target.ty().unwrap_or(Type::Interface),
			target: Some(Box::new(target)),
		})
	}

	/// Nil pointer to `pointee`.
	pub fn nil_pointer(pointee: Type) -> Self {
		Self::Pointer(PointerValue { pointee, target: None })
	}

	/// Interface holding `inner`.
	pub fn interface(inner: Value) -> Self {
		Self::Interface(Some(Box::new(inner)))
	}

	/// Nil interface.
	pub fn nil_interface() -> Self {
		Self::Interface(None)
	}

	/// Sequence of `elem` values.
	pub fn sequence(elem: Type, items: Vec<Value>) -> Self {
		Self::Sequence(SequenceValue { elem, items })
	}

	/// Non-nil map built from `(key, value)` pairs.
	pub fn map(key: Type, value: Type, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
		Self::Map(MapValue {
			key,
			value,
			entries: Some(entries.into_iter().map(|(key, value)| MapEntry { key, value }).collect()),
		})
	}

	/// Nil map.
	pub fn nil_map(key: Type, value: Type) -> Self {
		Self::Map(MapValue { key, value, entries: None })
	}

	/// Struct instance; `fields` follow the declaration order of `ty`.
	///
	/// Callers supply exactly one valid value per declared field.
	pub fn record(ty: &Arc<StructType>, fields: Vec<Value>) -> Self {
		debug_assert_eq!(fields.len(), ty.fields.len(), "struct {} expects one value per declared field", ty.name);
		debug_assert!(fields.iter().all(Value::is_valid), "struct {} holds an invalid field value", ty.name);
		Self::Struct(StructValue { ty: Arc::clone(ty), fields })
	}

	/// Whether the value is present.
	pub fn is_valid(&self) -> bool {
		!matches!(self, Self::Invalid)
	}

	/// Kind of a valid value.
	pub fn kind(&self) -> Option<Kind> {
		self.ty().map(|ty| ty.kind())
	}

	/// Dynamic type of a valid value.
	pub fn ty(&self) -> Option<Type> {
		let ty = match self {
			Self::Invalid => return None,
			Self::Bool(_) => Type::Bool,
			Self::Int(_) => Type::Int,
			Self::Uint(_) => Type::Uint,
			Self::Float(_) => Type::Float,
			Self::String(_) => Type::String,
			Self::Bytes(_) => Type::Bytes,
			Self::Pointer(item) => Type::pointer_to(item.pointee.clone()),
			Self::Interface(_) => Type::Interface,
			Self::Sequence(item) => Type::sequence_of(item.elem.clone()),
			Self::Map(item) => Type::map_of(item.key.clone(), item.value.clone()),
			Self::Struct(item) => Type::Struct(Arc::clone(&item.ty)),
		};
		Some(ty)
	}

	/// Follow a non-nil pointer.
	pub fn dereference(&self) -> Result<&Value> {
		match self {
			Self::Pointer(item) => item.target.as_deref().ok_or(NavError::NilDereference { kind: Kind::Pointer }),
			other => Err(other.mismatch(Kind::Pointer)),
		}
	}

	/// Open a non-nil interface to its concrete value.
	pub fn unwrap_interface(&self) -> Result<&Value> {
		match self {
			Self::Interface(inner) => inner.as_deref().ok_or(NavError::NilDereference { kind: Kind::Interface }),
			other => Err(other.mismatch(Kind::Interface)),
		}
	}

	/// Number of sequence elements.
	pub fn len(&self) -> Result<usize> {
		match self {
			Self::Sequence(item) => Ok(item.items.len()),
			other => Err(other.mismatch(Kind::Sequence)),
		}
	}

	/// Sequence element at `index`.
	pub fn element_at(&self, index: isize) -> Result<&Value> {
		let Self::Sequence(item) = self else {
			return Err(self.mismatch(Kind::Sequence));
		};
		usize::try_from(index)
			.ok()
			.and_then(|position| item.items.get(position))
			.ok_or(NavError::OutOfRange {
				index,
				len: item.items.len(),
			})
	}

	/// All entries of a non-nil map.
	pub fn map_entries(&self) -> Result<&[MapEntry]> {
		match self {
			Self::Map(item) => item.entries.as_deref().ok_or(NavError::NilDereference { kind: Kind::Map }),
			other => Err(other.mismatch(Kind::Map)),
		}
	}

	/// Entry stored under `key`.
	pub fn map_entry(&self, key: &Value) -> Result<&MapEntry> {
		let Self::Map(item) = self else {
			return Err(self.mismatch(Kind::Map));
		};
		let key_ty = key.ty().ok_or(NavError::InvalidValue)?;
		if !key_ty.is_assignable_to(&item.key) {
			return Err(NavError::KeyTypeMismatch {
				expected: item.key.to_string(),
				got: key_ty.to_string(),
			});
		}
		let entries = item.entries.as_deref().ok_or(NavError::NilDereference { kind: Kind::Map })?;
		entries
			.iter()
			.find(|entry| entry.key == *key)
			.ok_or_else(|| NavError::KeyNotFound { key: key.to_string() })
	}

	/// Names of visible exported fields in declaration order.
	pub fn exported_field_names(&self, options: &TraverseOptions) -> Result<Vec<&str>> {
		match self {
			Self::Struct(item) => Ok(item.exported_field_names(options)),
			other => Err(other.mismatch(Kind::Struct)),
		}
	}

	/// Exported field addressed by `name`, possibly promoted from an embedded struct.
	pub fn field_by_name(&self, name: &str, options: &TraverseOptions) -> Result<&Value> {
		match self {
			Self::Struct(item) => item.field(name, options),
			other => Err(other.mismatch(Kind::Struct)),
		}
	}

	pub(crate) fn mismatch(&self, expected: Kind) -> NavError {
		match self.kind() {
			Some(got) => NavError::KindMismatch { expected, got },
			None => NavError::InvalidValue,
		}
	}
}

impl StructValue {
	/// Struct type name.
	pub fn type_name(&self) -> &str {
		&self.ty.name
	}

	/// Exported field addressed by `name`.
	pub fn field(&self, name: &str, options: &TraverseOptions) -> Result<&Value> {
		match lookup_field(&self.ty, name, options.allow_promoted_fields) {
			FieldLookup::Found { def, index } => {
				if !def.exported {
					return Err(NavError::FieldNotExported {
						struct_name: self.type_name().to_owned(),
						field: name.to_owned(),
					});
				}
				field_by_index(self, &index, name)
			}
			FieldLookup::Ambiguous => Err(NavError::AmbiguousField {
				struct_name: self.type_name().to_owned(),
				field: name.to_owned(),
			}),
			FieldLookup::Missing => Err(NavError::FieldNotFound {
				struct_name: self.type_name().to_owned(),
				field: name.to_owned(),
			}),
		}
	}

	/// Names of visible exported fields in declaration order.
	pub fn exported_field_names(&self, options: &TraverseOptions) -> Vec<&str> {
		visible_fields(&self.ty, options.allow_promoted_fields)
			.into_iter()
			.filter(|field| field.def.exported)
			.map(|field| field.def.name.as_ref())
			.collect()
	}

	/// Visible exported fields with their values, skipping fields behind nil embedded pointers.
	pub fn exported_fields(&self, options: &TraverseOptions) -> Vec<(&str, &Value)> {
		visible_fields(&self.ty, options.allow_promoted_fields)
			.into_iter()
			.filter(|field| field.def.exported)
			.filter_map(|field| {
				let name = field.def.name.as_ref();
				field_by_index(self, &field.index, name).ok().map(|value| (name, value))
			})
			.collect()
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Invalid => f.write_str("<invalid>"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Int(value) => write!(f, "{value}"),
			Self::Uint(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value}"),
			Self::String(value) => write!(f, "{value:?}"),
			Self::Bytes(value) => write!(f, "bytes[{}]", value.len()),
			Self::Pointer(item) => match &item.target {
				Some(target) => write!(f, "&{target}"),
				None => f.write_str("nil"),
			},
			Self::Interface(inner) => match inner {
				Some(inner) => write!(f, "{inner}"),
				None => f.write_str("nil"),
			},
			Self::Sequence(item) => {
				f.write_str("[")?;
				for (idx, elem) in item.items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{elem}")?;
				}
				f.write_str("]")
			}
			Self::Map(item) => {
				let Some(entries) = &item.entries else {
					return f.write_str("nil");
				};
				f.write_str("map[")?;
				for (idx, entry) in entries.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: {}", entry.key, entry.value)?;
				}
				f.write_str("]")
			}
			Self::Struct(item) => {
				write!(f, "{}{{", item.ty.name)?;
				for (idx, (def, value)) in item.ty.fields.iter().zip(&item.fields).enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: {}", def.name, value)?;
				}
				f.write_str("}")
			}
		}
	}
}
