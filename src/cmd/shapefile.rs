use std::path::Path;

use serde::Deserialize;
use valbridge::marshal::{FieldShape, PayloadShape, RecordShape, Result, Shape, UnionShape, VariantShape};

/// One shape document entry, as written in JSON shape files.
///
/// Externally tagged: `"integer"`, `{"sequence": {"element": "integer"}}`,
/// `{"record": {"name": "Person", "fields": [...]}}`, and so on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShapeSpec {
	Any,
	Boolean,
	Integer,
	Float,
	Text,
	Bytes,
	Sequence { element: Box<ShapeSpec> },
	Mapping { value: Box<ShapeSpec> },
	Record { name: String, fields: Vec<FieldSpec> },
	Union { name: String, variants: Vec<VariantSpec> },
	Optional { inner: Box<ShapeSpec> },
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FieldSpec {
	name: String,
	shape: ShapeSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VariantSpec {
	name: String,
	#[serde(default)]
	payload: PayloadSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PayloadSpec {
	#[default]
	Unit,
	Value {
		shape: Box<ShapeSpec>,
	},
	Tuple {
		elements: Vec<ShapeSpec>,
	},
	Record {
		fields: Vec<FieldSpec>,
	},
}

/// Load and build a shape from a JSON shape file.
pub(crate) fn load_shape(path: &Path) -> Result<Shape> {
	let text = std::fs::read_to_string(path)?;
	let spec: ShapeSpec = serde_json::from_str(&text)?;
	Ok(build_shape(spec))
}

fn build_shape(spec: ShapeSpec) -> Shape {
	match spec {
		ShapeSpec::Any => Shape::Any,
		ShapeSpec::Boolean => Shape::Boolean,
		ShapeSpec::Integer => Shape::Integer,
		ShapeSpec::Float => Shape::Float,
		ShapeSpec::Text => Shape::Text,
		ShapeSpec::Bytes => Shape::Bytes,
		ShapeSpec::Sequence { element } => Shape::sequence(build_shape(*element)),
		ShapeSpec::Mapping { value } => Shape::mapping(build_shape(*value)),
		ShapeSpec::Record { name, fields } => Shape::Record(RecordShape::new(name, build_fields(fields))),
		ShapeSpec::Union { name, variants } => Shape::Union(UnionShape::new(
			name,
			variants
				.into_iter()
				.map(|variant| VariantShape::new(variant.name, build_payload(variant.payload)))
				.collect(),
		)),
		ShapeSpec::Optional { inner } => Shape::optional(build_shape(*inner)),
	}
}

fn build_fields(fields: Vec<FieldSpec>) -> Vec<FieldShape> {
	fields
		.into_iter()
		.map(|field| FieldShape::new(field.name, build_shape(field.shape)))
		.collect()
}

fn build_payload(payload: PayloadSpec) -> PayloadShape {
	match payload {
		PayloadSpec::Unit => PayloadShape::Unit,
		PayloadSpec::Value { shape } => PayloadShape::value(build_shape(*shape)),
		PayloadSpec::Tuple { elements } => PayloadShape::Tuple(elements.into_iter().map(build_shape).collect()),
		PayloadSpec::Record { fields } => PayloadShape::Record(build_fields(fields)),
	}
}

#[cfg(test)]
mod tests {
	use valbridge::marshal::{PayloadShape, Shape};

	use super::{ShapeSpec, build_shape};

	#[test]
	fn bare_names_parse_as_primitive_shapes() {
		let spec: ShapeSpec = serde_json::from_str("\"integer\"").expect("spec parses");
		assert_eq!(build_shape(spec), Shape::Integer);
	}

	#[test]
	fn nested_documents_build_nested_shapes() {
		let spec: ShapeSpec = serde_json::from_str(
			r#"{"record": {"name": "Person", "fields": [
				{"name": "name", "shape": "text"},
				{"name": "age", "shape": "integer"},
				{"name": "tags", "shape": {"sequence": {"element": "text"}}}
			]}}"#,
		)
		.expect("spec parses");

		let Shape::Record(record) = build_shape(spec) else {
			panic!("expected record shape");
		};
		assert_eq!(record.name, "Person");
		assert_eq!(record.fields.len(), 3);
		assert_eq!(record.fields[2].shape, Shape::sequence(Shape::Text));
	}

	#[test]
	fn variant_payload_defaults_to_unit() {
		let spec: ShapeSpec = serde_json::from_str(
			r#"{"union": {"name": "Demo", "variants": [{"name": "Empty"}]}}"#,
		)
		.expect("spec parses");

		let Shape::Union(union) = build_shape(spec) else {
			panic!("expected union shape");
		};
		assert_eq!(union.variants[0].payload, PayloadShape::Unit);
	}
}
