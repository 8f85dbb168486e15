use valbridge::marshal::{HostObject, HostValue};

/// Build a host value from a parsed JSON document.
///
/// JSON has no undefined, getters, or buffers, so the host value is always
/// plain data; `null` maps to host null.
pub(crate) fn host_from_json(value: &serde_json::Value) -> HostValue {
	match value {
		serde_json::Value::Null => HostValue::Null,
		serde_json::Value::Bool(v) => HostValue::Boolean(*v),
		serde_json::Value::Number(v) => HostValue::Number(v.as_f64().unwrap_or(f64::NAN)),
		serde_json::Value::String(v) => HostValue::text(v),
		serde_json::Value::Array(items) => HostValue::array(items.iter().map(host_from_json).collect()),
		serde_json::Value::Object(entries) => {
			let object = HostObject::new();
			for (key, item) in entries {
				object.set(key.clone(), host_from_json(item));
			}
			HostValue::object(object)
		}
	}
}

/// Render a host value as a JSON document.
///
/// Undefined collapses to `null`; buffers render as number arrays;
/// getter-backed properties render as their value, or `null` if they throw.
pub(crate) fn json_from_host(value: &HostValue) -> serde_json::Value {
	match value {
		HostValue::Undefined | HostValue::Null => serde_json::Value::Null,
		HostValue::Boolean(v) => serde_json::Value::Bool(*v),
		HostValue::Number(v) => serde_json::Number::from_f64(*v)
			.map(serde_json::Value::Number)
			.unwrap_or(serde_json::Value::Null),
		HostValue::Text(v) => serde_json::Value::String(v.to_string()),
		HostValue::Array(items) => serde_json::Value::Array(items.borrow().iter().map(json_from_host).collect()),
		HostValue::Object(object) => {
			let mut entries = serde_json::Map::new();
			for key in object.keys() {
				let item = match object.get(&key) {
					Ok(Some(item)) => json_from_host(&item),
					_ => serde_json::Value::Null,
				};
				entries.insert(key, item);
			}
			serde_json::Value::Object(entries)
		}
		HostValue::Bytes(buffer) => {
			serde_json::Value::Array(buffer.bytes().iter().map(|byte| serde_json::Value::from(*byte)).collect())
		}
	}
}

#[cfg(test)]
mod tests {
	use valbridge::marshal::HostValue;

	use super::{host_from_json, json_from_host};

	#[test]
	fn json_null_maps_to_host_null() {
		let value = host_from_json(&serde_json::Value::Null);
		assert_eq!(value, HostValue::Null);
	}

	#[test]
	fn documents_survive_a_host_round_trip() {
		let doc: serde_json::Value = serde_json::from_str(r#"{"a": 1, "b": [true, "x", null], "c": 0.5}"#)
			.expect("document parses");
		assert_eq!(json_from_host(&host_from_json(&doc)), doc);
	}
}
