use std::path::PathBuf;

use valbridge::marshal::{DecodeOptions, Result, decode_value};

use crate::cmd::jsonval::host_from_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::shapefile::load_shape;

/// Decode a JSON value file against a shape file and print the result.
pub fn run(value_path: PathBuf, shape_path: PathBuf, max_depth: Option<u32>) -> Result<()> {
	let shape = load_shape(&shape_path)?;
	let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&value_path)?)?;
	let host = host_from_json(&document);

	let mut options = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}

	let native = decode_value(&host, &shape, &options)?;

	println!("value: {}", value_path.display());
	println!("shape: {}", shape_path.display());
	print_value(&native, 0, 0, PrintOptions::default());
	Ok(())
}
