/// Declarative description of one expected native value structure.
///
/// Shapes drive decoding: the decoder dispatches on the shape, never on
/// ad-hoc runtime inspection of the host value (except under [`Shape::Any`],
/// which is the explicit runtime-directed escape hatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
	/// Accept any host value, classified by its runtime type.
	Any,
	/// Host boolean.
	Boolean,
	/// Host number restricted to finite integral values in i64 range.
	Integer,
	/// Host number, any finite or non-finite double.
	Float,
	/// Host string.
	Text,
	/// Host byte buffer; a strict representation-identity check, not a
	/// structural one.
	Bytes,
	/// Host array with every element decoded against one element shape.
	Sequence(Box<Shape>),
	/// Host object with every property value decoded against one shape.
	Mapping(Box<Shape>),
	/// Host object with a declared, ordered field list.
	Record(RecordShape),
	/// Host single-key object (or bare variant-name string) decoded as a
	/// tagged union.
	Union(UnionShape),
	/// Host undefined, null, or a missing field decode to Absent; anything
	/// else decodes against the inner shape.
	Optional(Box<Shape>),
}

impl Shape {
	/// Sequence-of shorthand.
	pub fn sequence(element: Shape) -> Self {
		Self::Sequence(Box::new(element))
	}

	/// Mapping-of shorthand.
	pub fn mapping(value: Shape) -> Self {
		Self::Mapping(Box::new(value))
	}

	/// Optional-of shorthand.
	pub fn optional(inner: Shape) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// Whether a missing or null host value satisfies this shape.
	pub fn is_optional(&self) -> bool {
		matches!(self, Self::Optional(_))
	}
}

/// Record shape: named fields decoded in declaration order.
///
/// Field order is behavior, not presentation: the first declared field that
/// is absent, mistyped, or whose read throws determines the reported error.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
	/// Record type name, used in diagnostics.
	pub name: String,
	/// Declared fields, lowest ordinal first.
	pub fields: Vec<FieldShape>,
}

impl RecordShape {
	/// Create a record shape.
	pub fn new(name: impl Into<String>, fields: Vec<FieldShape>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
	/// Field name.
	pub name: String,
	/// Expected field shape; wrap in [`Shape::Optional`] for non-required
	/// fields.
	pub shape: Shape,
}

impl FieldShape {
	/// Create a field declaration.
	pub fn new(name: impl Into<String>, shape: Shape) -> Self {
		Self {
			name: name.into(),
			shape,
		}
	}
}

/// Union shape: the closed set of accepted variants.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionShape {
	/// Union type name, used in diagnostics.
	pub name: String,
	/// Declared variants.
	pub variants: Vec<VariantShape>,
}

impl UnionShape {
	/// Create a union shape.
	pub fn new(name: impl Into<String>, variants: Vec<VariantShape>) -> Self {
		Self {
			name: name.into(),
			variants,
		}
	}

	/// Look up one declared variant by name.
	pub fn variant(&self, name: &str) -> Option<&VariantShape> {
		self.variants.iter().find(|variant| variant.name == name)
	}
}

/// One declared union variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantShape {
	/// Variant name; the single key (or bare string) in host form.
	pub name: String,
	/// Expected payload shape.
	pub payload: PayloadShape,
}

impl VariantShape {
	/// Create a variant declaration.
	pub fn new(name: impl Into<String>, payload: PayloadShape) -> Self {
		Self {
			name: name.into(),
			payload,
		}
	}
}

/// Payload shape of one union variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
	/// No payload; the host form is the bare variant name.
	Unit,
	/// Single value decoded against one shape.
	Value(Box<Shape>),
	/// Fixed-arity ordered payload with per-position shapes.
	Tuple(Vec<Shape>),
	/// Named-field payload decoded like a record body.
	Record(Vec<FieldShape>),
}

impl PayloadShape {
	/// Single-value shorthand.
	pub fn value(shape: Shape) -> Self {
		Self::Value(Box::new(shape))
	}
}
