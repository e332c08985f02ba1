use std::sync::LazyLock;

use miette::SourceSpan;
use regex::Regex;

use crate::EachInMapError;
use crate::EachInMapResult;

/// The keyword separating the loop variables from the table name.
static SEPARATOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+in\s+").expect("separator pattern is valid"));

/// One or more `$`-prefixed variables, comma separated.
static VARIABLES: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\$\w[\w-]*(?:\s*,\s*\$\w[\w-]*)*$").expect("variables pattern is valid")
});

/// One or more words separated by whitespace or commas.
static TABLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[\w-]+(?:[\s,]+[\w-]+)*$").expect("table pattern is valid"));

/// The parsed parameters of an `@each-in-map` directive, e.g.
/// `$name, $value in display_types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationHeader {
	/// Variable names without their `$` sigil. The first one is bound to the
	/// entry key.
	pub names: Vec<String>,
	/// The comma separated tokens after `in`. Only the first one names a
	/// table.
	pub table: Vec<String>,
}

impl IterationHeader {
	/// The variable bound to each entry key.
	pub fn key_name(&self) -> &str {
		self.names.first().map_or("", String::as_str)
	}

	/// The variables bound to entry values.
	pub fn value_names(&self) -> &[String] {
		self.names.get(1..).unwrap_or_default()
	}

	/// The name of the table to iterate.
	pub fn table_name(&self) -> &str {
		self.table.first().map_or("", String::as_str)
	}
}

/// Split padded params into the variable and table segments.
fn segments(padded: &str) -> Option<(&str, &str)> {
	let mut parts = SEPARATOR.splitn(padded, 3);
	let names = parts.next()?;
	let table = parts.next()?;
	Some((names.trim(), table.trim()))
}

/// Check that `params` has the shape `$a[, $b...] in table`.
///
/// `span` is attached to the returned error so it can point at the
/// directive.
pub fn validate_header(params: &str, span: SourceSpan) -> EachInMapResult<()> {
	let padded = format!(" {params} ");
	let Some((names, table)) = segments(&padded) else {
		return Err(EachInMapError::MissingKeyword { span });
	};

	if !VARIABLES.is_match(names) {
		return Err(EachInMapError::MissingVariables { span });
	}

	if !TABLE.is_match(table) {
		return Err(EachInMapError::MissingTable { span });
	}

	Ok(())
}

/// Validate and parse the params of an `@each-in-map` directive.
pub fn parse_header(params: &str, span: SourceSpan) -> EachInMapResult<IterationHeader> {
	validate_header(params, span)?;

	let padded = format!(" {params} ");
	let Some((names, table)) = segments(&padded) else {
		return Err(EachInMapError::MissingKeyword { span });
	};

	let names = split_list(names)
		.into_iter()
		.map(|name| name.strip_prefix('$').unwrap_or(&name).to_string())
		.collect();

	Ok(IterationHeader {
		names,
		table: split_list(table),
	})
}

/// Split a comma separated list. Commas inside quotes or parentheses do not
/// split, items are trimmed, and empty items are dropped.
pub fn split_list(text: &str) -> Vec<String> {
	let mut items = vec![];
	let mut current = String::new();
	let mut depth = 0usize;
	let mut quote: Option<char> = None;
	let mut escaped = false;

	for ch in text.chars() {
		if escaped {
			escaped = false;
		} else if ch == '\\' {
			escaped = true;
		} else if let Some(open) = quote {
			if ch == open {
				quote = None;
			}
		} else {
			match ch {
				'"' | '\'' => quote = Some(ch),
				'(' => depth += 1,
				')' => depth = depth.saturating_sub(1),
				',' if depth == 0 => {
					push_item(&mut items, &current);
					current.clear();
					continue;
				}
				_ => {}
			}
		}

		current.push(ch);
	}

	push_item(&mut items, &current);
	items
}

fn push_item(items: &mut Vec<String>, item: &str) {
	let item = item.trim();
	if !item.is_empty() {
		items.push(item.to_string());
	}
}
