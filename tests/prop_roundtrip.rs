#![allow(missing_docs)]

use proptest::prelude::*;
use valbridge::marshal::{
	DecodeOptions, FieldShape, MapEntry, NativeValue, PayloadShape, RecordShape, Shape, UnionPayload,
	UnionShape, UnionValue, VariantShape, decode_value, encode_value,
};

fn leaf() -> impl Strategy<Value = NativeValue> {
	prop_oneof![
		Just(NativeValue::Absent),
		any::<bool>().prop_map(NativeValue::Boolean),
		// Kept inside the exactly-representable f64 range so the host's
		// single numeric type cannot lose precision.
		any::<i32>().prop_map(|n| NativeValue::Integer(i64::from(n))),
		(-1.0e9_f64..1.0e9).prop_map(NativeValue::Float),
		"[a-z]{0,8}".prop_map(NativeValue::Text),
		proptest::collection::vec(any::<u8>(), 0..16).prop_map(NativeValue::Bytes),
	]
}

fn entries_from(items: Vec<NativeValue>) -> Vec<MapEntry> {
	items
		.into_iter()
		.enumerate()
		.map(|(index, value)| MapEntry::new(format!("k{index}"), value))
		.collect()
}

fn native_value() -> impl Strategy<Value = NativeValue> {
	leaf().prop_recursive(3, 24, 4, |inner| {
		let payload = prop_oneof![
			Just(UnionPayload::Unit),
			inner.clone().prop_map(|value| UnionPayload::Value(Box::new(value))),
			proptest::collection::vec(inner.clone(), 0..3).prop_map(UnionPayload::Sequence),
			proptest::collection::vec(inner.clone(), 0..3)
				.prop_map(|items| UnionPayload::Mapping(entries_from(items))),
		];
		prop_oneof![
			// Sequences repeat one element so a single element shape covers
			// the whole sequence.
			(inner.clone(), 0..3_usize).prop_map(|(item, count)| NativeValue::Sequence(vec![item; count])),
			proptest::collection::vec(inner.clone(), 0..4)
				.prop_map(|items| NativeValue::Mapping(entries_from(items))),
			("[A-Z][a-z]{0,5}", payload)
				.prop_map(|(variant, payload)| NativeValue::Union(UnionValue::new(variant, payload))),
		]
	})
}

/// Derive the shape a well-formed value decodes against.
fn shape_of(value: &NativeValue) -> Shape {
	match value {
		NativeValue::Absent => Shape::optional(Shape::Any),
		NativeValue::Boolean(_) => Shape::Boolean,
		NativeValue::Integer(_) => Shape::Integer,
		NativeValue::Float(_) => Shape::Float,
		NativeValue::Text(_) => Shape::Text,
		NativeValue::Bytes(_) => Shape::Bytes,
		NativeValue::Sequence(items) => Shape::sequence(items.first().map(shape_of).unwrap_or(Shape::Any)),
		NativeValue::Mapping(entries) => Shape::Record(RecordShape::new("Generated", fields_of(entries))),
		NativeValue::Union(union) => Shape::Union(UnionShape::new(
			"Generated",
			vec![VariantShape::new(union.variant.clone(), payload_shape_of(&union.payload))],
		)),
	}
}

fn fields_of(entries: &[MapEntry]) -> Vec<FieldShape> {
	entries
		.iter()
		.map(|entry| FieldShape::new(entry.key.clone(), shape_of(&entry.value)))
		.collect()
}

fn payload_shape_of(payload: &UnionPayload) -> PayloadShape {
	match payload {
		UnionPayload::Unit => PayloadShape::Unit,
		UnionPayload::Value(inner) => PayloadShape::value(shape_of(inner)),
		UnionPayload::Sequence(items) => PayloadShape::Tuple(items.iter().map(shape_of).collect()),
		UnionPayload::Mapping(entries) => PayloadShape::Record(fields_of(entries)),
	}
}

proptest! {
	#[test]
	fn encode_then_decode_returns_the_same_value(value in native_value()) {
		let shape = shape_of(&value);
		let host = encode_value(&value);
		let decoded = decode_value(&host, &shape, &DecodeOptions::default())
			.expect("well-formed value decodes against its own shape");
		prop_assert_eq!(decoded, value);
	}
}
