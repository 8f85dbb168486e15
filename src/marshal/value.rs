/// One marshaled native value.
///
/// The variant set is closed and immutable after construction; decoding and
/// encoding always build fresh values, never mutate in place.
#[derive(Debug, Clone)]
pub enum NativeValue {
	/// No value. Both host spellings of "nothing" (a missing optional field
	/// and an explicit null) collapse here; encoding always produces host
	/// null, so the distinction is not recoverable after a round trip.
	Absent,
	/// Native boolean.
	Boolean(bool),
	/// Signed 64-bit integer.
	Integer(i64),
	/// Double-precision float.
	Float(f64),
	/// UTF-8 text.
	Text(String),
	/// Ordered byte payload, distinct from text.
	Bytes(Vec<u8>),
	/// Ordered sequence; heterogeneous elements allowed.
	Sequence(Vec<NativeValue>),
	/// Keyed entries in stable insertion order.
	Mapping(Vec<MapEntry>),
	/// Tagged union: one variant name plus payload.
	Union(UnionValue),
}

/// One named entry of a native mapping.
#[derive(Debug, Clone)]
pub struct MapEntry {
	/// Entry key.
	pub key: String,
	/// Entry value.
	pub value: NativeValue,
}

impl MapEntry {
	/// Create an entry.
	pub fn new(key: impl Into<String>, value: NativeValue) -> Self {
		Self {
			key: key.into(),
			value,
		}
	}
}

/// Tagged union value.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
	/// Variant name.
	pub variant: String,
	/// Variant payload.
	pub payload: UnionPayload,
}

impl UnionValue {
	/// Create a union value.
	pub fn new(variant: impl Into<String>, payload: UnionPayload) -> Self {
		Self {
			variant: variant.into(),
			payload,
		}
	}
}

/// Payload carried by one union variant.
#[derive(Debug, Clone)]
pub enum UnionPayload {
	/// No payload.
	Unit,
	/// Single-value payload.
	Value(Box<NativeValue>),
	/// Ordered-sequence payload.
	Sequence(Vec<NativeValue>),
	/// Keyed payload.
	Mapping(Vec<MapEntry>),
}

impl NativeValue {
	/// Logical kind label used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Absent => "absent",
			Self::Boolean(_) => "boolean",
			Self::Integer(_) => "integer",
			Self::Float(_) => "float",
			Self::Text(_) => "text",
			Self::Bytes(_) => "bytes",
			Self::Sequence(_) => "sequence",
			Self::Mapping(_) => "mapping",
			Self::Union(_) => "union",
		}
	}

	/// Create a text value.
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}
}

impl PartialEq for NativeValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Absent, Self::Absent) => true,
			(Self::Boolean(a), Self::Boolean(b)) => a == b,
			(Self::Integer(a), Self::Integer(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			// Mixed numeric comparison coerces to float.
			(Self::Integer(a), Self::Float(b)) | (Self::Float(b), Self::Integer(a)) => *a as f64 == *b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Sequence(a), Self::Sequence(b)) => a == b,
			(Self::Mapping(a), Self::Mapping(b)) => mapping_eq(a, b),
			(Self::Union(a), Self::Union(b)) => a == b,
			_ => false,
		}
	}
}

impl PartialEq for UnionPayload {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Unit, Self::Unit) => true,
			(Self::Value(a), Self::Value(b)) => a == b,
			(Self::Sequence(a), Self::Sequence(b)) => a == b,
			(Self::Mapping(a), Self::Mapping(b)) => mapping_eq(a, b),
			_ => false,
		}
	}
}

/// Key-set equality with per-key value equality; entry order is irrelevant.
fn mapping_eq(a: &[MapEntry], b: &[MapEntry]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	a.iter().all(|entry| {
		b.iter()
			.find(|candidate| candidate.key == entry.key)
			.is_some_and(|candidate| candidate.value == entry.value)
	})
}

#[cfg(test)]
mod tests {
	use super::{MapEntry, NativeValue, UnionPayload, UnionValue};

	#[test]
	fn mixed_numeric_equality_coerces_to_float() {
		assert_eq!(NativeValue::Integer(32), NativeValue::Float(32.0));
		assert_ne!(NativeValue::Integer(32), NativeValue::Float(32.5));
	}

	#[test]
	fn mapping_equality_ignores_entry_order() {
		let a = NativeValue::Mapping(vec![
			MapEntry::new("a", NativeValue::Integer(1)),
			MapEntry::new("b", NativeValue::Integer(2)),
		]);
		let b = NativeValue::Mapping(vec![
			MapEntry::new("b", NativeValue::Integer(2)),
			MapEntry::new("a", NativeValue::Integer(1)),
		]);
		assert_eq!(a, b);
	}

	#[test]
	fn union_equality_requires_variant_and_payload() {
		let a = NativeValue::Union(UnionValue::new("Tuple", UnionPayload::Sequence(vec![NativeValue::Integer(27)])));
		let b = NativeValue::Union(UnionValue::new("Tuple", UnionPayload::Sequence(vec![NativeValue::Integer(28)])));
		let c = NativeValue::Union(UnionValue::new("Struct", UnionPayload::Sequence(vec![NativeValue::Integer(27)])));
		assert_ne!(a, b);
		assert_ne!(a, c);
		assert_eq!(a, a.clone());
	}

	#[test]
	fn bytes_and_sequence_are_distinct_kinds() {
		let bytes = NativeValue::Bytes(vec![1, 2, 3]);
		let seq = NativeValue::Sequence(vec![
			NativeValue::Integer(1),
			NativeValue::Integer(2),
			NativeValue::Integer(3),
		]);
		assert_ne!(bytes, seq);
	}
}
