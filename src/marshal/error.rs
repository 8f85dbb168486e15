use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Errors produced while decoding host values, extracting fields, and
/// adapting host calls.
///
/// Display strings are part of the external contract: consumers match the
/// literal substrings (`assertion failed:`, `` missing field `a` ``,
/// `not enough arguments`, `failed downcast to Buffer`) against the
/// exception text surfaced to the host.
#[derive(Debug, Error)]
pub enum MarshalError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Shape or value document parse failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Host value runtime type does not match the expected shape.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual runtime kind, with detail where the kind alone is ambiguous.
		got: String,
	},
	/// Required record field is absent from the host object.
	#[error("missing field `{name}`")]
	MissingField {
		/// Declared field name.
		name: String,
	},
	/// Union decode met a variant name not present in the shape.
	#[error("unknown variant `{variant}`")]
	UnknownVariant {
		/// Offending variant name.
		variant: String,
	},
	/// Representation-identity check failed: the host value is structurally
	/// similar but not the required nominal type.
	#[error("failed downcast to {type_name}")]
	Downcast {
		/// Required host type name.
		type_name: &'static str,
	},
	/// Call supplied fewer arguments than the function requires.
	#[error("not enough arguments: expected {expected}, got {got}")]
	NotEnoughArguments {
		/// Required argument count.
		expected: usize,
		/// Supplied argument count.
		got: usize,
	},
	/// Decoder recursion depth exceeded the configured limit.
	#[error("recursion limit exceeded (max={max_depth})")]
	RecursionLimitExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Exception raised by host-side code during a property read, passed
	/// through with its message unmodified.
	#[error("{message}")]
	HostThrow {
		/// Original host exception message.
		message: String,
	},
	/// Sequence element failed to decode at a known index.
	#[error("element {index}: {source}")]
	ElementMismatch {
		/// Zero-based element index.
		index: usize,
		/// Underlying element decode failure.
		#[source]
		source: Box<MarshalError>,
	},
	/// Native-side logic rejected a validly-typed value.
	#[error("assertion failed: {detail}")]
	Assertion {
		/// Expression-like description of the failed check.
		detail: String,
	},
}
