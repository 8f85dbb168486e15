use std::rc::Rc;

use crate::marshal::host::{BytesKind, HostObject, HostValue};
use crate::marshal::value::{MapEntry, NativeValue, UnionPayload};

/// Encode one native value into its host representation.
///
/// Total over the native model: every variant has a defined host form and
/// encoding never fails. Absent encodes as host null, collapsing the
/// missing/explicit-null distinction.
pub fn encode_value(value: &NativeValue) -> HostValue {
	match value {
		NativeValue::Absent => HostValue::Null,
		NativeValue::Boolean(v) => HostValue::Boolean(*v),
		NativeValue::Integer(v) => HostValue::Number(*v as f64),
		NativeValue::Float(v) => HostValue::Number(*v),
		NativeValue::Text(v) => HostValue::text(v),
		NativeValue::Bytes(v) => HostValue::bytes(BytesKind::Buffer, v.clone()),
		NativeValue::Sequence(items) => HostValue::array(items.iter().map(encode_value).collect()),
		NativeValue::Mapping(entries) => encode_entries(entries),
		NativeValue::Union(union) => match &union.payload {
			UnionPayload::Unit => HostValue::text(&union.variant),
			UnionPayload::Value(inner) => single_key(&union.variant, encode_value(inner)),
			UnionPayload::Sequence(items) => {
				single_key(&union.variant, HostValue::array(items.iter().map(encode_value).collect()))
			}
			UnionPayload::Mapping(entries) => single_key(&union.variant, encode_entries(entries)),
		},
	}
}

fn encode_entries(entries: &[MapEntry]) -> HostValue {
	let object = HostObject::new();
	for entry in entries {
		object.set(entry.key.clone(), encode_value(&entry.value));
	}
	HostValue::Object(Rc::new(object))
}

fn single_key(variant: &str, payload: HostValue) -> HostValue {
	let object = HostObject::new();
	object.set(variant, payload);
	HostValue::Object(Rc::new(object))
}
