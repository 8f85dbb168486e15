mod adapter;
mod decode;
mod encode;
mod error;
mod field;
mod host;
mod shape;
mod value;

/// Host-callable function wrapper, module export table, and assertion helper.
pub use adapter::{HostFunction, Module, NativeFn, check_eq};
/// Shape-directed decoding entry point and options.
pub use decode::{DecodeOptions, decode_value};
/// Native-to-host encoding entry point.
pub use encode::encode_value;
/// Error and result aliases.
pub use error::{MarshalError, Result};
/// Single named-field decode helper.
pub use field::read_field;
/// Dynamic host value model.
pub use host::{BytesKind, Getter, HostBytes, HostException, HostObject, HostValue};
/// Shape descriptor types.
pub use shape::{FieldShape, PayloadShape, RecordShape, Shape, UnionShape, VariantShape};
/// Native value model.
pub use value::{MapEntry, NativeValue, UnionPayload, UnionValue};
