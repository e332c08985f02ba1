use crate::Table;
use crate::TableValue;

/// The keys and value columns an `@each` loop iterates over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
	/// Entry keys, repeated once per row they contribute.
	pub keys: Vec<String>,
	/// Value columns. Column `i` feeds the `i`-th value variable.
	pub values: Vec<Vec<TableValue>>,
}

impl Projection {
	/// Project `table` for a loop with `value_count` value variables.
	pub fn new(table: &Table, value_count: usize) -> Self {
		if value_count > 1 {
			destructured(table, value_count)
		} else {
			grouped(table, value_count)
		}
	}
}

/// Projection for zero or one value variables.
///
/// Each key repeats once per row its entry contributes: once for a scalar,
/// `len - (value_count - 1)` times for a sequence. The single value column
/// holds every entry's raw value, so a sequence stays one grouped item.
fn grouped(table: &Table, value_count: usize) -> Projection {
	let mut keys = vec![];
	let mut column = Vec::with_capacity(table.len());

	for (key, value) in table.iter() {
		let repeat = match value {
			TableValue::Scalar(_) => 1,
			// `value_count` is 0 or 1 here, so this is `len + 1` or `len`.
			TableValue::Sequence(items) => items.len() + 1 - value_count,
		};

		keys.extend(std::iter::repeat_n(key.clone(), repeat));
		column.push(value.clone());
	}

	tracing::trace!(keys = keys.len(), values = column.len(), "grouped projection");

	Projection {
		keys,
		values: vec![column],
	}
}

/// Projection for two or more value variables.
///
/// Element `i` of a sequence entry goes to column `i`; elements past the
/// last column are dropped. A scalar entry only feeds column 0.
fn destructured(table: &Table, value_count: usize) -> Projection {
	let keys: Vec<String> = table.keys().cloned().collect();
	let mut values = vec![Vec::new(); value_count];

	for value in table.values() {
		match value {
			TableValue::Scalar(scalar) => values[0].push(TableValue::Scalar(scalar.clone())),
			TableValue::Sequence(items) => {
				for (column, item) in values.iter_mut().zip(items) {
					column.push(TableValue::Scalar(item.clone()));
				}
			}
		}
	}

	tracing::trace!(keys = keys.len(), columns = values.len(), "destructured projection");

	Projection { keys, values }
}
