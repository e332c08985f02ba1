use crate::IterationHeader;
use crate::Projection;
use crate::TableValue;

/// `$a, $b, $c`
pub fn render_variables(names: &[String]) -> String {
	names
		.iter()
		.map(|name| format!("${name}"))
		.collect::<Vec<_>>()
		.join(", ")
}

/// `(a, b, c)`
pub fn render_keys(keys: &[String]) -> String {
	format!("({})", keys.join(", "))
}

/// Render each value column as a parenthesized list and join the columns
/// with commas. Sequence entries are spliced into their column.
pub fn render_columns(values: &[Vec<TableValue>]) -> String {
	values
		.iter()
		.map(|column| {
			let items: Vec<String> = column
				.iter()
				.flat_map(TableValue::scalars)
				.map(ToString::to_string)
				.collect();
			format!("({})", items.join(", "))
		})
		.collect::<Vec<_>>()
		.join(", ")
}

/// The params of the `@each` rule replacing an `@each-in-map` directive:
/// `$key, $value in (k1, k2), (v1, v2)`.
pub fn render_params(header: &IterationHeader, projection: &Projection) -> String {
	format!(
		"{} in {}, {}",
		render_variables(&header.names),
		render_keys(&projection.keys),
		render_columns(&projection.values)
	)
}
