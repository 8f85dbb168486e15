use crate::marshal::error::{MarshalError, Result};
use crate::marshal::field::read_field_at;
use crate::marshal::host::{HostObject, HostValue};
use crate::marshal::shape::{FieldShape, PayloadShape, Shape, UnionShape};
use crate::marshal::value::{MapEntry, NativeValue, UnionPayload, UnionValue};

/// Runtime limits for shape-directed decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
	/// Maximum recursive decode depth. Shape-directed decoding only follows
	/// declared structure, so this bound is only reachable through deep
	/// nesting or a recursive shape over a cyclic host graph; either way the
	/// decode fails closed instead of hanging.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 32 }
	}
}

/// Decode one host value against an expected shape.
pub fn decode_value(value: &HostValue, shape: &Shape, options: &DecodeOptions) -> Result<NativeValue> {
	decode_at_depth(value, shape, options, 0)
}

pub(crate) fn decode_at_depth(
	value: &HostValue,
	shape: &Shape,
	options: &DecodeOptions,
	depth: u32,
) -> Result<NativeValue> {
	if depth >= options.max_depth {
		return Err(MarshalError::RecursionLimitExceeded {
			max_depth: options.max_depth,
		});
	}

	match shape {
		Shape::Any => decode_any(value, options, depth),
		Shape::Boolean => match value {
			HostValue::Boolean(v) => Ok(NativeValue::Boolean(*v)),
			other => Err(mismatch("boolean", other)),
		},
		Shape::Integer => decode_integer(value),
		Shape::Float => match value {
			HostValue::Number(v) => Ok(NativeValue::Float(*v)),
			other => Err(mismatch("number", other)),
		},
		Shape::Text => match value {
			HostValue::Text(v) => Ok(NativeValue::Text(v.to_string())),
			other => Err(mismatch("string", other)),
		},
		Shape::Bytes => match value {
			// Any kind sharing buffer representation is accepted; the check
			// is nominal, so a structurally-similar plain array fails.
			HostValue::Bytes(buffer) => Ok(NativeValue::Bytes(buffer.bytes().to_vec())),
			_ => Err(MarshalError::Downcast { type_name: "Buffer" }),
		},
		Shape::Sequence(element) => decode_sequence(value, element, options, depth),
		Shape::Mapping(value_shape) => decode_mapping(value, value_shape, options, depth),
		Shape::Record(record) => {
			let HostValue::Object(object) = value else {
				return Err(mismatch("object", value));
			};
			Ok(NativeValue::Mapping(decode_fields(object, &record.fields, options, depth)?))
		}
		Shape::Union(union) => decode_union(value, union, options, depth),
		Shape::Optional(inner) => match value {
			HostValue::Undefined | HostValue::Null => Ok(NativeValue::Absent),
			other => decode_at_depth(other, inner, options, depth),
		},
	}
}

fn mismatch(expected: &'static str, value: &HostValue) -> MarshalError {
	MarshalError::TypeMismatch {
		expected,
		got: value.type_name().to_owned(),
	}
}

fn decode_integer(value: &HostValue) -> Result<NativeValue> {
	let HostValue::Number(v) = value else {
		return Err(mismatch("integer", value));
	};
	if !v.is_finite() {
		return Err(MarshalError::TypeMismatch {
			expected: "integer",
			got: "non-finite number".to_owned(),
		});
	}
	if v.fract() != 0.0 {
		return Err(MarshalError::TypeMismatch {
			expected: "integer",
			got: "non-integral number".to_owned(),
		});
	}
	if *v < i64::MIN as f64 || *v > i64::MAX as f64 {
		return Err(MarshalError::TypeMismatch {
			expected: "integer",
			got: "out-of-range number".to_owned(),
		});
	}
	Ok(NativeValue::Integer(*v as i64))
}

fn decode_sequence(value: &HostValue, element: &Shape, options: &DecodeOptions, depth: u32) -> Result<NativeValue> {
	let HostValue::Array(items) = value else {
		return Err(mismatch("array", value));
	};
	let items = items.borrow();

	let mut out = Vec::with_capacity(items.len());
	for (index, item) in items.iter().enumerate() {
		let decoded = decode_at_depth(item, element, options, depth + 1).map_err(|err| MarshalError::ElementMismatch {
			index,
			source: Box::new(err),
		})?;
		out.push(decoded);
	}
	Ok(NativeValue::Sequence(out))
}

fn decode_mapping(value: &HostValue, value_shape: &Shape, options: &DecodeOptions, depth: u32) -> Result<NativeValue> {
	let HostValue::Object(object) = value else {
		return Err(mismatch("object", value));
	};

	let mut entries = Vec::with_capacity(object.len());
	for key in object.keys() {
		let Some(item) = object
			.get(&key)
			.map_err(|err| MarshalError::HostThrow { message: err.message })?
		else {
			continue;
		};
		let decoded = decode_at_depth(&item, value_shape, options, depth + 1)?;
		entries.push(MapEntry::new(key, decoded));
	}
	Ok(NativeValue::Mapping(entries))
}

/// Read declared fields in declaration order; the first absent, mistyped,
/// or throwing field wins. Undeclared host properties are never read.
fn decode_fields(object: &HostObject, fields: &[FieldShape], options: &DecodeOptions, depth: u32) -> Result<Vec<MapEntry>> {
	let mut entries = Vec::with_capacity(fields.len());
	for field in fields {
		let decoded = read_field_at(object, &field.name, &field.shape, options, depth + 1)?;
		entries.push(MapEntry::new(field.name.clone(), decoded));
	}
	Ok(entries)
}

fn decode_union(value: &HostValue, union: &UnionShape, options: &DecodeOptions, depth: u32) -> Result<NativeValue> {
	match value {
		// A bare string names a unit variant.
		HostValue::Text(name) => {
			let Some(variant) = union.variant(name) else {
				return Err(MarshalError::UnknownVariant {
					variant: name.to_string(),
				});
			};
			if !matches!(variant.payload, PayloadShape::Unit) {
				return Err(MarshalError::TypeMismatch {
					expected: "single-key object",
					got: "string".to_owned(),
				});
			}
			Ok(NativeValue::Union(UnionValue::new(name.to_string(), UnionPayload::Unit)))
		}
		HostValue::Object(object) => {
			let keys = object.keys();
			if keys.len() != 1 {
				return Err(MarshalError::TypeMismatch {
					expected: "single-key object",
					got: format!("object with {} keys", keys.len()),
				});
			}
			let name = &keys[0];
			let Some(variant) = union.variant(name) else {
				return Err(MarshalError::UnknownVariant { variant: name.clone() });
			};
			let payload_value = object
				.get(name)
				.map_err(|err| MarshalError::HostThrow { message: err.message })?
				.unwrap_or(HostValue::Undefined);
			let payload = decode_payload(&payload_value, &variant.payload, options, depth)?;
			Ok(NativeValue::Union(UnionValue::new(name.clone(), payload)))
		}
		other => Err(mismatch("string or single-key object", other)),
	}
}

fn decode_payload(value: &HostValue, payload: &PayloadShape, options: &DecodeOptions, depth: u32) -> Result<UnionPayload> {
	match payload {
		PayloadShape::Unit => Ok(UnionPayload::Unit),
		PayloadShape::Value(shape) => {
			let decoded = decode_at_depth(value, shape, options, depth + 1)?;
			Ok(UnionPayload::Value(Box::new(decoded)))
		}
		PayloadShape::Tuple(shapes) => {
			let HostValue::Array(items) = value else {
				return Err(mismatch("array", value));
			};
			let items = items.borrow();
			if items.len() != shapes.len() {
				return Err(MarshalError::TypeMismatch {
					expected: "tuple payload",
					got: format!("array of {} elements", items.len()),
				});
			}
			let mut out = Vec::with_capacity(shapes.len());
			for (index, (item, shape)) in items.iter().zip(shapes).enumerate() {
				let decoded = decode_at_depth(item, shape, options, depth + 1).map_err(|err| MarshalError::ElementMismatch {
					index,
					source: Box::new(err),
				})?;
				out.push(decoded);
			}
			Ok(UnionPayload::Sequence(out))
		}
		PayloadShape::Record(fields) => {
			let HostValue::Object(object) = value else {
				return Err(mismatch("object", value));
			};
			Ok(UnionPayload::Mapping(decode_fields(object, fields, options, depth)?))
		}
	}
}

/// Decode directed by the host value's runtime type.
///
/// This is the one path where a cyclic host graph can recurse, so the depth
/// bound does the real work here.
fn decode_any(value: &HostValue, options: &DecodeOptions, depth: u32) -> Result<NativeValue> {
	match value {
		HostValue::Undefined | HostValue::Null => Ok(NativeValue::Absent),
		HostValue::Boolean(v) => Ok(NativeValue::Boolean(*v)),
		HostValue::Number(v) => {
			if v.is_finite() && v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64 {
				Ok(NativeValue::Integer(*v as i64))
			} else {
				Ok(NativeValue::Float(*v))
			}
		}
		HostValue::Text(v) => Ok(NativeValue::Text(v.to_string())),
		HostValue::Bytes(buffer) => Ok(NativeValue::Bytes(buffer.bytes().to_vec())),
		HostValue::Array(items) => {
			let items = items.borrow();
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				let decoded = decode_at_depth(item, &Shape::Any, options, depth + 1).map_err(|err| {
					MarshalError::ElementMismatch {
						index,
						source: Box::new(err),
					}
				})?;
				out.push(decoded);
			}
			Ok(NativeValue::Sequence(out))
		}
		HostValue::Object(object) => {
			let mut entries = Vec::with_capacity(object.len());
			for key in object.keys() {
				let Some(item) = object
					.get(&key)
					.map_err(|err| MarshalError::HostThrow { message: err.message })?
				else {
					continue;
				};
				let decoded = decode_at_depth(&item, &Shape::Any, options, depth + 1)?;
				entries.push(MapEntry::new(key, decoded));
			}
			Ok(NativeValue::Mapping(entries))
		}
	}
}
