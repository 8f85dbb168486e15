use crate::marshal::decode::{DecodeOptions, decode_at_depth};
use crate::marshal::error::{MarshalError, Result};
use crate::marshal::host::HostObject;
use crate::marshal::shape::Shape;
use crate::marshal::value::NativeValue;

/// Decode one named field of a host object.
///
/// Three outcomes: present-and-valid yields the decoded value;
/// present-but-wrong-shape yields the inner decode failure; absent yields
/// [`NativeValue::Absent`] for optional shapes and
/// [`MarshalError::MissingField`] otherwise. A property read that throws
/// propagates the host exception message verbatim.
pub fn read_field(object: &HostObject, name: &str, shape: &Shape, options: &DecodeOptions) -> Result<NativeValue> {
	read_field_at(object, name, shape, options, 0)
}

pub(crate) fn read_field_at(
	object: &HostObject,
	name: &str,
	shape: &Shape,
	options: &DecodeOptions,
	depth: u32,
) -> Result<NativeValue> {
	let value = object.get(name).map_err(|err| MarshalError::HostThrow { message: err.message })?;

	match value {
		Some(value) => decode_at_depth(&value, shape, options, depth),
		None if shape.is_optional() => Ok(NativeValue::Absent),
		None => Err(MarshalError::MissingField { name: name.to_owned() }),
	}
}

#[cfg(test)]
mod tests {
	use super::read_field;
	use crate::marshal::decode::DecodeOptions;
	use crate::marshal::host::{HostException, HostObject, HostValue};
	use crate::marshal::shape::Shape;
	use crate::marshal::value::NativeValue;

	#[test]
	fn present_field_decodes_against_shape() {
		let obj = HostObject::new();
		obj.set("a", HostValue::Number(1.0));
		let value = read_field(&obj, "a", &Shape::Integer, &DecodeOptions::default()).expect("field decodes");
		assert_eq!(value, NativeValue::Integer(1));
	}

	#[test]
	fn missing_required_field_names_the_field() {
		let obj = HostObject::new();
		let err = read_field(&obj, "a", &Shape::Integer, &DecodeOptions::default()).expect_err("field is missing");
		assert_eq!(err.to_string(), "missing field `a`");
	}

	#[test]
	fn missing_optional_field_decodes_to_absent() {
		let obj = HostObject::new();
		let value = read_field(&obj, "e", &Shape::optional(Shape::Integer), &DecodeOptions::default())
			.expect("optional field decodes");
		assert_eq!(value, NativeValue::Absent);
	}

	#[test]
	fn throwing_getter_propagates_message_verbatim() {
		let obj = HostObject::new();
		obj.set_getter("c", || Err(HostException::new("Hi There prop c")));
		let err = read_field(&obj, "c", &Shape::Text, &DecodeOptions::default()).expect_err("getter throws");
		assert_eq!(err.to_string(), "Hi There prop c");
	}

	#[test]
	fn wrong_shape_surfaces_the_decode_error() {
		let obj = HostObject::new();
		obj.set("a", HostValue::text("not a number"));
		let err = read_field(&obj, "a", &Shape::Integer, &DecodeOptions::default()).expect_err("shape mismatch");
		assert_eq!(err.to_string(), "type mismatch: expected integer, got string");
	}
}
