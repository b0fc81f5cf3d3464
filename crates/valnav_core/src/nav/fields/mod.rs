//! Type-level struct field resolution with embedded-struct promotion.
//!
//! A name resolves at the shallowest embedding depth where it occurs. Two candidates at that
//! depth make the name ambiguous, and neither is visible.

use std::collections::HashSet;

use crate::nav::{FieldDef, Kind, NavError, Result, StructType, StructValue, Value};

/// Outcome of resolving a field name against a struct type.
#[derive(Debug)]
pub(crate) enum FieldLookup<'t> {
	/// Unique field at the shallowest depth, with its index chain from the root struct.
	Found { def: &'t FieldDef, index: Vec<usize> },
	/// More than one field shares the name at the shallowest depth.
	Ambiguous,
	/// No field has the name.
	Missing,
}

/// Field visible from a root struct.
#[derive(Debug)]
pub(crate) struct VisibleField<'t> {
	pub def: &'t FieldDef,
	pub index: Vec<usize>,
}

pub(crate) fn lookup_field<'t>(root: &'t StructType, name: &str, promote: bool) -> FieldLookup<'t> {
	let mut visited: HashSet<&'t str> = HashSet::from([root.name.as_ref()]);
	let mut level: Vec<(&'t StructType, Vec<usize>)> = vec![(root, Vec::new())];

	while !level.is_empty() {
		let mut hits = Vec::new();
		let mut next = Vec::new();

		for (item, prefix) in &level {
			let item: &'t StructType = *item;
			for (position, def) in item.fields.iter().enumerate() {
				let mut index = prefix.clone();
				index.push(position);

				if def.name.as_ref() == name {
					hits.push((def, index));
					continue;
				}

				if !promote || !def.embedded {
					continue;
				}
				if let Some(inner) = def.ty.embedded_struct() {
					if !visited.contains(inner.name.as_ref()) {
						next.push((&**inner, index));
					}
				}
			}
		}

		if hits.len() > 1 {
			return FieldLookup::Ambiguous;
		}
		if let Some((def, index)) = hits.pop() {
			return FieldLookup::Found { def, index };
		}

		for &(item, _) in &next {
			visited.insert(item.name.as_ref());
		}
		level = next;
	}

	FieldLookup::Missing
}

/// Fields addressable by name from `root`, in declaration order with promoted fields following
/// the embedded field that promotes them.
pub(crate) fn visible_fields(root: &StructType, promote: bool) -> Vec<VisibleField<'_>> {
	let mut out = Vec::new();
	let mut chain = vec![root.name.as_ref()];
	collect_fields(root, &[], promote, &mut chain, &mut out);

	out.retain(|field| match lookup_field(root, &field.def.name, promote) {
		FieldLookup::Found { index, .. } => index == field.index,
		FieldLookup::Ambiguous | FieldLookup::Missing => false,
	});
	out
}

fn collect_fields<'t>(item: &'t StructType, prefix: &[usize], promote: bool, chain: &mut Vec<&'t str>, out: &mut Vec<VisibleField<'t>>) {
	for (position, def) in item.fields.iter().enumerate() {
		let mut index = prefix.to_vec();
		index.push(position);

		let inner = if promote && def.embedded { def.ty.embedded_struct() } else { None };
		match inner {
			Some(inner) if !chain.contains(&inner.name.as_ref()) => {
				out.push(VisibleField { def, index: index.clone() });
				chain.push(inner.name.as_ref());
				collect_fields(inner, &index, promote, chain, out);
				chain.pop();
			}
			_ => out.push(VisibleField { def, index }),
		}
	}
}

/// Follow an index chain from `root`, stepping through embedded structs and embedded pointers.
pub(crate) fn field_by_index<'v>(root: &'v StructValue, index: &[usize], field: &str) -> Result<&'v Value> {
	let missing = || NavError::FieldNotFound {
		struct_name: root.type_name().to_owned(),
		field: field.to_owned(),
	};

	let Some((last, hops)) = index.split_last() else {
		return Err(missing());
	};

	let mut current = root;
	for &hop in hops {
		let embedded = current.fields.get(hop).ok_or_else(missing)?;
		current = match embedded {
			Value::Struct(inner) => inner,
			Value::Pointer(ptr) => match ptr.target.as_deref() {
				Some(Value::Struct(inner)) => inner,
				Some(other) => return Err(other.mismatch(Kind::Struct)),
				None => {
					return Err(NavError::NilEmbeddedPath {
						struct_name: root.type_name().to_owned(),
						field: field.to_owned(),
						embedded: current.ty.fields.get(hop).map(|def| def.name.to_string()).unwrap_or_default(),
					});
				}
			},
			other => return Err(other.mismatch(Kind::Struct)),
		};
	}

	current.fields.get(*last).ok_or_else(missing)
}
