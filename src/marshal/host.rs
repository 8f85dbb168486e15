use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Exception thrown by host-side code.
///
/// This is the error type visible to host callers: getter failures, decode
/// failures surfaced through an adapted call, and native assertion failures
/// all arrive here as message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostException {
	/// Human-visible message text.
	pub message: String,
}

impl HostException {
	/// Create an exception carrying the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

impl fmt::Display for HostException {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for HostException {}

/// Property getter callback; may throw a host exception.
pub type Getter = Rc<dyn Fn() -> std::result::Result<HostValue, HostException>>;

/// Nominal representation tag for host byte buffers.
///
/// Every kind shares the same byte representation; the tag records which
/// host constructor produced the value and participates only in downcast
/// acceptance, never in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesKind {
	/// Canonical host buffer type.
	Buffer,
	/// Fixed-width u8 view sharing buffer representation.
	Uint8Array,
	/// Clamped u8 view sharing buffer representation.
	Uint8ClampedArray,
}

/// Host byte buffer: a byte payload plus its nominal kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBytes {
	/// Nominal constructor tag.
	pub kind: BytesKind,
	data: Vec<u8>,
}

impl HostBytes {
	/// Create a buffer of the given kind over owned bytes.
	pub fn new(kind: BytesKind, data: Vec<u8>) -> Self {
		Self { kind, data }
	}

	/// Byte contents.
	pub fn bytes(&self) -> &[u8] {
		&self.data
	}
}

enum Slot {
	Value(HostValue),
	Getter(Getter),
}

/// Host object: insertion-ordered named properties.
///
/// A property slot is either a plain value or a getter; reading a getter
/// slot invokes the callback, which may throw. Interior mutability permits
/// self-referential object graphs.
pub struct HostObject {
	slots: RefCell<IndexMap<String, Slot>>,
}

impl HostObject {
	/// Create an empty object.
	pub fn new() -> Self {
		Self {
			slots: RefCell::new(IndexMap::new()),
		}
	}

	/// Set a plain value property, keeping first-insertion order.
	pub fn set(&self, name: impl Into<String>, value: HostValue) {
		self.slots.borrow_mut().insert(name.into(), Slot::Value(value));
	}

	/// Set a getter-backed property.
	pub fn set_getter(
		&self,
		name: impl Into<String>,
		getter: impl Fn() -> std::result::Result<HostValue, HostException> + 'static,
	) {
		self.slots.borrow_mut().insert(name.into(), Slot::Getter(Rc::new(getter)));
	}

	/// Read one property.
	///
	/// Returns `Ok(None)` when the property is absent; a throwing getter
	/// propagates its exception.
	pub fn get(&self, name: &str) -> std::result::Result<Option<HostValue>, HostException> {
		let getter = {
			let slots = self.slots.borrow();
			match slots.get(name) {
				None => return Ok(None),
				Some(Slot::Value(value)) => return Ok(Some(value.clone())),
				Some(Slot::Getter(getter)) => Rc::clone(getter),
			}
		};
		// Borrow released before the getter runs: it may read this object.
		getter().map(Some)
	}

	/// Own property names in insertion order.
	pub fn keys(&self) -> Vec<String> {
		self.slots.borrow().keys().cloned().collect()
	}

	/// Number of own properties.
	pub fn len(&self) -> usize {
		self.slots.borrow().len()
	}

	/// Whether the object has no properties.
	pub fn is_empty(&self) -> bool {
		self.slots.borrow().is_empty()
	}
}

impl Default for HostObject {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for HostObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Shallow on purpose: objects may be self-referential.
		write!(f, "HostObject {{ keys: {:?} }}", self.keys())
	}
}

/// One dynamically-typed host value.
#[derive(Debug, Clone)]
pub enum HostValue {
	/// Absent value, the `undefined` spelling.
	Undefined,
	/// Absent value, the explicit `null` spelling.
	Null,
	/// Host boolean.
	Boolean(bool),
	/// Host number; the host has a single double-precision numeric type.
	Number(f64),
	/// Host string.
	Text(Rc<str>),
	/// Host ordered indexable collection.
	Array(Rc<RefCell<Vec<HostValue>>>),
	/// Host keyed object.
	Object(Rc<HostObject>),
	/// Host byte buffer.
	Bytes(Rc<HostBytes>),
}

impl HostValue {
	/// Create a text value.
	pub fn text(value: impl AsRef<str>) -> Self {
		Self::Text(Rc::from(value.as_ref()))
	}

	/// Create an array value over owned elements.
	pub fn array(items: Vec<HostValue>) -> Self {
		Self::Array(Rc::new(RefCell::new(items)))
	}

	/// Create an object value from a built [`HostObject`].
	pub fn object(object: HostObject) -> Self {
		Self::Object(Rc::new(object))
	}

	/// Create a byte buffer value of the given nominal kind.
	pub fn bytes(kind: BytesKind, data: Vec<u8>) -> Self {
		Self::Bytes(Rc::new(HostBytes::new(kind, data)))
	}

	/// Runtime type label used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Boolean(_) => "boolean",
			Self::Number(_) => "number",
			Self::Text(_) => "string",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
			Self::Bytes(_) => "bytes",
		}
	}
}

impl PartialEq for HostValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) => true,
			(Self::Null, Self::Null) => true,
			(Self::Boolean(a), Self::Boolean(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => *a.borrow() == *b.borrow(),
			(Self::Object(a), Self::Object(b)) => object_eq(a, b),
			// Buffers compare by contents; the nominal kind is identity, not value.
			(Self::Bytes(a), Self::Bytes(b)) => a.bytes() == b.bytes(),
			_ => false,
		}
	}
}

fn object_eq(a: &HostObject, b: &HostObject) -> bool {
	let a_slots = a.slots.borrow();
	let b_slots = b.slots.borrow();
	if a_slots.len() != b_slots.len() {
		return false;
	}
	a_slots.iter().all(|(key, slot)| {
		let (Slot::Value(a_value), Some(Slot::Value(b_value))) = (slot, b_slots.get(key)) else {
			// Getter-backed slots never compare equal.
			return false;
		};
		a_value == b_value
	})
}

#[cfg(test)]
mod tests {
	use super::{BytesKind, HostException, HostObject, HostValue};

	#[test]
	fn property_order_is_insertion_order() {
		let obj = HostObject::new();
		obj.set("b", HostValue::Number(2.0));
		obj.set("a", HostValue::Number(1.0));
		obj.set("c", HostValue::Number(3.0));
		assert_eq!(obj.keys(), vec!["b", "a", "c"]);
	}

	#[test]
	fn absent_property_reads_as_none() {
		let obj = HostObject::new();
		assert_eq!(obj.get("missing").expect("read succeeds"), None);
	}

	#[test]
	fn throwing_getter_propagates_exception() {
		let obj = HostObject::new();
		obj.set_getter("boom", || Err(HostException::new("Hi There prop boom")));
		let err = obj.get("boom").expect_err("getter throws");
		assert_eq!(err.message, "Hi There prop boom");
	}

	#[test]
	fn null_and_undefined_are_distinct() {
		assert_ne!(HostValue::Null, HostValue::Undefined);
	}

	#[test]
	fn buffers_compare_by_contents_across_kinds() {
		let a = HostValue::bytes(BytesKind::Buffer, vec![252, 251, 250]);
		let b = HostValue::bytes(BytesKind::Uint8Array, vec![252, 251, 250]);
		let c = HostValue::bytes(BytesKind::Buffer, vec![0, 0, 0]);
		assert_eq!(a, b);
		assert_ne!(a, c);
	}
}
