use std::fmt::Display;

use miette::SourceSpan;

/// A single location in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
	/// 1-indexed line number.
	pub line: usize,
	/// 1-indexed column number, counted in characters.
	pub column: usize,
	/// 0-indexed byte offset.
	pub offset: usize,
}

impl Point {
	pub fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// The start and end of a node in the source it was parsed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
	pub start: Point,
	pub end: Point,
}

impl Position {
	pub fn new(
		start_line: usize,
		start_column: usize,
		start_offset: usize,
		end_line: usize,
		end_column: usize,
		end_offset: usize,
	) -> Self {
		Self {
			start: Point::new(start_line, start_column, start_offset),
			end: Point::new(end_line, end_column, end_offset),
		}
	}

	/// Number of bytes covered by this position.
	pub fn len(&self) -> usize {
		self.end.offset.saturating_sub(self.start.offset)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The byte span used for diagnostic labels.
	pub fn span(&self) -> SourceSpan {
		SourceSpan::new(self.start.offset.into(), self.len())
	}
}

impl From<Position> for SourceSpan {
	fn from(position: Position) -> Self {
		position.span()
	}
}

/// Maps byte offsets of a source string to line/column points.
pub(crate) struct LineIndex {
	/// Byte offset at which each line starts.
	line_starts: Vec<usize>,
}

impl LineIndex {
	pub(crate) fn new(source: &str) -> Self {
		let mut line_starts = vec![0];
		line_starts.extend(
			source
				.bytes()
				.enumerate()
				.filter(|(_, byte)| *byte == b'\n')
				.map(|(index, _)| index + 1),
		);

		Self { line_starts }
	}

	pub(crate) fn point(&self, source: &str, offset: usize) -> Point {
		let line = self
			.line_starts
			.partition_point(|start| *start <= offset)
			.max(1);
		let line_start = self.line_starts[line - 1];
		let column = source
			.get(line_start..offset)
			.map_or(offset - line_start, |text| text.chars().count())
			+ 1;

		Point::new(line, column, offset)
	}

	pub(crate) fn position(&self, source: &str, start: usize, end: usize) -> Position {
		Position {
			start: self.point(source, start),
			end: self.point(source, end),
		}
	}
}
