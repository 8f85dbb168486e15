use indexmap::IndexMap;

use crate::marshal::decode::{DecodeOptions, decode_value};
use crate::marshal::encode::encode_value;
use crate::marshal::error::{MarshalError, Result};
use crate::marshal::host::{HostException, HostValue};
use crate::marshal::shape::Shape;
use crate::marshal::value::NativeValue;

/// Native operation signature invoked through an adapted host call.
pub type NativeFn = dyn Fn(Vec<NativeValue>) -> Result<NativeValue>;

/// A native operation wrapped for host-side invocation.
///
/// A call decodes each positional argument against its declared shape,
/// invokes the native body, and encodes the return value; any failure along
/// the way aborts the call and surfaces as a single host exception.
pub struct HostFunction {
	/// Export name, used in diagnostics.
	pub name: String,
	/// Declared parameter shapes, positional order.
	pub params: Vec<Shape>,
	/// Decode limits applied to every argument.
	pub options: DecodeOptions,
	body: Box<NativeFn>,
}

impl HostFunction {
	/// Wrap a native operation with its declared parameter shapes.
	pub fn new(
		name: impl Into<String>,
		params: Vec<Shape>,
		body: impl Fn(Vec<NativeValue>) -> Result<NativeValue> + 'static,
	) -> Self {
		Self {
			name: name.into(),
			params,
			options: DecodeOptions::default(),
			body: Box::new(body),
		}
	}

	/// Required argument count: parameters whose shape is not optional.
	pub fn required_arity(&self) -> usize {
		self.params.iter().filter(|shape| !shape.is_optional()).count()
	}

	/// Invoke with positional host arguments.
	///
	/// The arity check precedes all decoding; no partial execution of the
	/// native body happens on any decode failure. Missing trailing optional
	/// arguments decode as host undefined.
	pub fn call(&self, args: &[HostValue]) -> std::result::Result<HostValue, HostException> {
		if args.len() < self.required_arity() {
			return Err(MarshalError::NotEnoughArguments {
				expected: self.required_arity(),
				got: args.len(),
			}
			.into());
		}

		let mut decoded = Vec::with_capacity(self.params.len());
		for (index, shape) in self.params.iter().enumerate() {
			let arg = args.get(index).cloned().unwrap_or(HostValue::Undefined);
			decoded.push(decode_value(&arg, shape, &self.options)?);
		}

		let result = (self.body)(decoded)?;
		Ok(encode_value(&result))
	}
}

impl From<MarshalError> for HostException {
	fn from(err: MarshalError) -> Self {
		match err {
			// A host-raised exception travels back out unmodified.
			MarshalError::HostThrow { message } => Self { message },
			other => Self {
				message: other.to_string(),
			},
		}
	}
}

/// Insertion-ordered export table of host-callable functions.
#[derive(Default)]
pub struct Module {
	exports: IndexMap<String, HostFunction>,
}

impl Module {
	/// Create an empty module.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register one function under its own name.
	pub fn export(&mut self, function: HostFunction) {
		self.exports.insert(function.name.clone(), function);
	}

	/// Look up one export.
	pub fn get(&self, name: &str) -> Option<&HostFunction> {
		self.exports.get(name)
	}

	/// Export names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.exports.keys().map(String::as_str)
	}

	/// Invoke one export by name with positional host arguments.
	pub fn call(&self, name: &str, args: &[HostValue]) -> std::result::Result<HostValue, HostException> {
		let Some(function) = self.exports.get(name) else {
			return Err(HostException::new(format!("unknown export `{name}`")));
		};
		function.call(args)
	}
}

/// Compare two native values, failing with an assertion error on mismatch.
///
/// The failure text carries the `assertion failed:` prefix that host-side
/// consumers pattern-match.
pub fn check_eq(left: &NativeValue, right: &NativeValue) -> Result<()> {
	if left == right {
		return Ok(());
	}
	Err(MarshalError::Assertion {
		detail: format!("`(left == right)` left: `{left:?}`, right: `{right:?}`"),
	})
}
