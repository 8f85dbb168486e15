use std::path::PathBuf;

use valbridge::marshal::{DecodeOptions, Result, decode_value, encode_value};

use crate::cmd::jsonval::{host_from_json, json_from_host};
use crate::cmd::shapefile::load_shape;

/// Decode a JSON value file against a shape file, re-encode it, and print
/// the normalized document.
pub fn run(value_path: PathBuf, shape_path: PathBuf) -> Result<()> {
	let shape = load_shape(&shape_path)?;
	let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&value_path)?)?;
	let host = host_from_json(&document);

	let native = decode_value(&host, &shape, &DecodeOptions::default())?;
	let normalized = json_from_host(&encode_value(&native));

	println!("{}", serde_json::to_string_pretty(&normalized)?);
	Ok(())
}
