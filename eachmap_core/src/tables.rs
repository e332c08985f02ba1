use std::fmt::Display;
use std::num::FpCategory;
use std::path::Path;

use derive_more::Deref;
use derive_more::DerefMut;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use crate::EachInMapError;
use crate::EachInMapResult;

/// A single value in a table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
	Text(String),
	Number(serde_json::Number),
}

impl Display for Scalar {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Number(number) => {
				match number.as_f64() {
					Some(float) => write_number(f, float),
					None => write!(f, "{number}"),
				}
			}
		}
	}
}

/// Print a number the way JavaScript stringifies it: `1.0` as `1`, `-0` as
/// `0`, and exponent form with an explicit sign outside `1e-6..1e21`.
fn write_number(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
	if value.classify() == FpCategory::Zero {
		return f.write_str("0");
	}

	if !value.is_finite() || (1e-6..1e21).contains(&value.abs()) {
		return write!(f, "{value}");
	}

	let exponent = format!("{value:e}");
	match exponent.split_once('e') {
		Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
		_ => f.write_str(&exponent),
	}
}

impl From<&str> for Scalar {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<i64> for Scalar {
	fn from(value: i64) -> Self {
		Self::Number(value.into())
	}
}

/// The value of a table entry: a single scalar or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TableValue {
	Scalar(Scalar),
	Sequence(Vec<Scalar>),
}

impl TableValue {
	/// The scalars this value contributes, in order.
	pub fn scalars(&self) -> &[Scalar] {
		match self {
			Self::Scalar(scalar) => std::slice::from_ref(scalar),
			Self::Sequence(items) => items,
		}
	}
}

impl From<Scalar> for TableValue {
	fn from(value: Scalar) -> Self {
		Self::Scalar(value)
	}
}

impl From<&str> for TableValue {
	fn from(value: &str) -> Self {
		Self::Scalar(value.into())
	}
}

impl From<i64> for TableValue {
	fn from(value: i64) -> Self {
		Self::Scalar(value.into())
	}
}

impl From<Vec<Scalar>> for TableValue {
	fn from(items: Vec<Scalar>) -> Self {
		Self::Sequence(items)
	}
}

/// One named lookup table. Entries keep the order they were defined in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Table(IndexMap<String, TableValue>);

impl Table {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<K: Into<String>, V: Into<TableValue>> FromIterator<(K, V)> for Table {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// Every table in a maps document, keyed by table name.
///
/// Built once per processed document and handed to each expansion by
/// reference; nothing mutates it while a document is being processed.
///
/// ```json
/// {
///   "display_types": { "None": "none", "Flex": "flex" },
///   "direction_map": { "X": ["-left", "-right"], "T": "-top" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tables(IndexMap<String, Table>);

impl Tables {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read and parse the maps document at `path`.
	pub fn load(path: &Path) -> EachInMapResult<Self> {
		let display = path.display().to_string();
		let content =
			std::fs::read_to_string(path).map_err(|error| EachInMapError::TableDocument {
				path: display.clone(),
				reason: error.to_string(),
			})?;
		let tables = parse_document(&content, display)?;

		tracing::debug!(
			path = %path.display(),
			tables = tables.len(),
			"loaded maps document"
		);

		Ok(tables)
	}

	/// Parse a maps document from a JSON string.
	pub fn from_json(content: &str) -> EachInMapResult<Self> {
		parse_document(content, "<inline>".to_string())
	}

	/// Look up a table by name.
	pub fn table(&self, name: &str) -> Option<&Table> {
		self.get(name)
	}

	/// A comma separated list of table names, for diagnostics.
	pub fn names(&self) -> String {
		if self.is_empty() {
			return "(none)".to_string();
		}

		self.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
	}
}

impl<K: Into<String>> FromIterator<(K, Table)> for Tables {
	fn from_iter<I: IntoIterator<Item = (K, Table)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, table)| (name.into(), table))
				.collect(),
		)
	}
}

fn parse_document(content: &str, path: String) -> EachInMapResult<Tables> {
	serde_json::from_str(content).map_err(|error| {
		EachInMapError::TableDocument {
			path,
			reason: error.to_string(),
		}
	})
}
