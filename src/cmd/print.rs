use valbridge::marshal::{MapEntry, NativeValue, UnionPayload};

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for text.
	pub max_string_len: usize,
	/// Maximum number of elements printed for sequences.
	pub max_seq_items: usize,
	/// Maximum recursive print depth for nested values.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_seq_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one native value tree.
pub(crate) fn print_value(value: &NativeValue, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		NativeValue::Absent => println!("{pad}absent"),
		NativeValue::Boolean(v) => println!("{pad}{v}"),
		NativeValue::Integer(v) => println!("{pad}{v}"),
		NativeValue::Float(v) => println!("{pad}{v}"),
		NativeValue::Text(v) => println!("{pad}\"{}\"", truncate(v, options.max_string_len)),
		NativeValue::Bytes(v) => println!("{pad}bytes[{}]", v.len()),
		NativeValue::Sequence(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_seq_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_seq_items {
				println!("{pad}  ... {} more", items.len() - options.max_seq_items);
			}
			println!("{pad}]");
		}
		NativeValue::Mapping(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... {} entries }}", entries.len());
				return;
			}
			print_entries(entries, &pad, indent, depth, options);
		}
		NativeValue::Union(union) => match &union.payload {
			UnionPayload::Unit => println!("{pad}{}", union.variant),
			UnionPayload::Value(inner) => {
				println!("{pad}{}:", union.variant);
				print_value(inner, indent + 2, depth + 1, options);
			}
			UnionPayload::Sequence(items) => {
				println!("{pad}{}:", union.variant);
				print_value(&NativeValue::Sequence(items.clone()), indent + 2, depth + 1, options);
			}
			UnionPayload::Mapping(entries) => {
				println!("{pad}{}:", union.variant);
				print_value(&NativeValue::Mapping(entries.clone()), indent + 2, depth + 1, options);
			}
		},
	}
}

fn print_entries(entries: &[MapEntry], pad: &str, indent: usize, depth: u32, options: PrintOptions) {
	println!("{pad}{{");
	for entry in entries {
		match &entry.value {
			NativeValue::Sequence(_) | NativeValue::Mapping(_) | NativeValue::Union(_) => {
				println!("{pad}  {}:", entry.key);
				print_value(&entry.value, indent + 4, depth + 1, options);
			}
			_ => {
				print!("{pad}  {}: ", entry.key);
				print_value(&entry.value, 0, depth + 1, options);
			}
		}
	}
	println!("{pad}}}");
}

fn truncate(text: &str, max_len: usize) -> String {
	if text.chars().count() <= max_len {
		return text.to_owned();
	}
	let head: String = text.chars().take(max_len).collect();
	format!("{head}...")
}

#[cfg(test)]
mod tests {
	use super::truncate;

	#[test]
	fn truncate_counts_scalar_values_not_bytes() {
		assert_eq!(truncate("🤷🤷🤷", 2), "🤷🤷...");
		assert_eq!(truncate("abc", 3), "abc");
	}
}
