use std::ops::Range;

use crate::AtRule;
use crate::AtRuleRaws;
use crate::Comment;
use crate::Declaration;
use crate::DeclarationRaws;
use crate::EachInMapError;
use crate::EachInMapResult;
use crate::Node;
use crate::Position;
use crate::Root;
use crate::Rule;
use crate::RuleRaws;
use crate::lexer::RawToken;
use crate::lexer::SpannedToken;
use crate::lexer::tokenize;
use crate::position::LineIndex;

/// Parse stylesheet source into a lossless tree.
pub fn parse(source: impl AsRef<str>) -> EachInMapResult<Root> {
	let source = source.as_ref();
	let tokens = tokenize(source)?;
	TreeBuilder::new(source).build(&tokens)
}

/// An open container waiting for its `}`.
struct Frame {
	/// The at-rule or rule that owns the block. `None` for the root.
	header: Option<Node>,
	nodes: Vec<Node>,
}

/// The statement currently being read, up to its `;`, `{` or `}`.
#[derive(Default)]
struct Statement {
	/// Offset of the first non-space token.
	start: Option<usize>,
	/// End of the last non-space token.
	end: usize,
	/// Span of the leading `@name` for at-rules.
	at_word: Option<Range<usize>>,
	/// Offset of the first `:` outside of parentheses.
	colon: Option<usize>,
	depth: usize,
}

impl Statement {
	fn mark(&mut self, span: &Range<usize>) {
		self.start.get_or_insert(span.start);
		self.end = span.end;
	}
}

struct TreeBuilder<'a> {
	source: &'a str,
	lines: LineIndex,
	stack: Vec<Frame>,
	statement: Statement,
	/// Where the raw text preceding the next node begins.
	before_start: usize,
}

impl<'a> TreeBuilder<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			lines: LineIndex::new(source),
			stack: vec![Frame {
				header: None,
				nodes: vec![],
			}],
			statement: Statement::default(),
			before_start: 0,
		}
	}

	fn build(mut self, tokens: &[SpannedToken]) -> EachInMapResult<Root> {
		for (token, span) in tokens {
			match token {
				RawToken::Space => {}
				RawToken::Comment if self.statement.start.is_none() => self.push_comment(span),
				RawToken::OpenParen => {
					self.statement.mark(span);
					self.statement.depth += 1;
				}
				RawToken::CloseParen => {
					self.statement.mark(span);
					self.statement.depth = self.statement.depth.saturating_sub(1);
				}
				RawToken::OpenCurly if self.statement.depth == 0 => self.open_block(span),
				RawToken::Semicolon if self.statement.depth == 0 => {
					if self.statement.start.is_some() {
						self.finish_statement(span.start, true)?;
					}
				}
				RawToken::CloseCurly => self.close_block(span)?,
				RawToken::Colon => {
					if self.statement.depth == 0 && self.statement.colon.is_none() {
						self.statement.colon = Some(span.start);
					}
					self.statement.mark(span);
				}
				RawToken::AtWord => {
					if self.statement.start.is_none() {
						self.statement.at_word = Some(span.clone());
					}
					self.statement.mark(span);
				}
				_ => self.statement.mark(span),
			}
		}

		let end = self.source.len();
		self.finish(end)
	}

	fn position(&self, start: usize, end: usize) -> Position {
		self.lines.position(self.source, start, end)
	}

	fn take_before(&mut self, until: usize) -> String {
		let before = self.source[self.before_start..until].to_string();
		self.before_start = until;
		before
	}

	fn push_node(&mut self, node: Node) {
		if let Some(frame) = self.stack.last_mut() {
			frame.nodes.push(node);
		}
	}

	fn push_comment(&mut self, span: &Range<usize>) {
		let before = self.take_before(span.start);
		let comment = Comment {
			text: self.source[span.clone()].to_string(),
			before,
			position: self.position(span.start, span.end),
		};
		self.before_start = span.end;
		self.push_node(Node::Comment(comment));
	}

	/// Turn the buffered statement into an at-rule or declaration. `end` is
	/// the offset of the terminating `;`, `}` or end of input.
	fn finish_statement(&mut self, end: usize, semicolon: bool) -> EachInMapResult<()> {
		let statement = std::mem::take(&mut self.statement);
		let Some(start) = statement.start else {
			return Ok(());
		};

		let before = self.take_before(start);
		let after_value = self.source[statement.end..end].to_string();
		let node_end = if semicolon { end + 1 } else { end };
		let position = self.position(start, node_end);

		let node = if let Some(at_word) = statement.at_word {
			let (after_name, params) = split_leading_space(&self.source[at_word.end..statement.end]);
			Node::AtRule(AtRule {
				name: self.source[at_word.start + 1..at_word.end].to_string(),
				params: params.to_string(),
				nodes: None,
				raws: AtRuleRaws {
					before,
					after_name: after_name.to_string(),
					between: after_value,
					after: String::new(),
					semicolon,
				},
				position,
			})
		} else {
			let Some(colon) = statement.colon else {
				return Err(EachInMapError::UnknownWord {
					word: self.source[start..statement.end].to_string(),
					span: (start, statement.end - start).into(),
				});
			};

			let prop = self.source[start..colon].trim_end();
			let (space_after_colon, value) =
				split_leading_space(&self.source[colon + 1..statement.end]);
			let between = format!("{}:{space_after_colon}", &self.source[start + prop.len()..colon]);

			Node::Declaration(Declaration {
				prop: prop.to_string(),
				value: value.to_string(),
				raws: DeclarationRaws {
					before,
					between,
					after_value,
					semicolon,
				},
				position,
			})
		};

		self.push_node(node);
		self.before_start = node_end;

		Ok(())
	}

	fn open_block(&mut self, brace: &Range<usize>) {
		let statement = std::mem::take(&mut self.statement);
		let start = statement.start.unwrap_or(brace.start);
		let header_end = statement.start.map_or(brace.start, |_| statement.end);
		let before = self.take_before(start);
		let between = self.source[header_end..brace.start].to_string();
		let position = self.position(start, brace.end);

		let header = if let Some(at_word) = statement.at_word {
			let (after_name, params) = split_leading_space(&self.source[at_word.end..header_end]);
			Node::AtRule(AtRule {
				name: self.source[at_word.start + 1..at_word.end].to_string(),
				params: params.to_string(),
				nodes: Some(vec![]),
				raws: AtRuleRaws {
					before,
					after_name: after_name.to_string(),
					between,
					after: String::new(),
					semicolon: false,
				},
				position,
			})
		} else {
			Node::Rule(Rule {
				selector: self.source[start..header_end].to_string(),
				nodes: vec![],
				raws: RuleRaws {
					before,
					between,
					after: String::new(),
				},
				position,
			})
		};

		self.stack.push(Frame {
			header: Some(header),
			nodes: vec![],
		});
		self.before_start = brace.end;
	}

	fn close_block(&mut self, brace: &Range<usize>) -> EachInMapResult<()> {
		self.finish_statement(brace.start, false)?;

		if self.stack.len() == 1 {
			return Err(EachInMapError::UnexpectedCloseBrace {
				span: (brace.start, brace.len()).into(),
			});
		}

		let after = self.take_before(brace.start);
		let Some(Frame {
			header: Some(mut header),
			nodes,
		}) = self.stack.pop()
		else {
			return Ok(());
		};
		let end = self.lines.point(self.source, brace.end);

		match &mut header {
			Node::AtRule(at_rule) => {
				at_rule.nodes = Some(nodes);
				at_rule.raws.after = after;
				at_rule.position.end = end;
			}
			Node::Rule(rule) => {
				rule.nodes = nodes;
				rule.raws.after = after;
				rule.position.end = end;
			}
			Node::Declaration(_) | Node::Comment(_) => {}
		}

		self.push_node(header);
		self.before_start = brace.end;

		Ok(())
	}

	fn finish(mut self, end: usize) -> EachInMapResult<Root> {
		self.finish_statement(end, false)?;

		if self.stack.len() > 1 {
			let span = self
				.stack
				.pop()
				.and_then(|frame| frame.header)
				.map_or_else(|| (end, 0).into(), |header| header.position().span());
			return Err(EachInMapError::UnclosedBlock { span });
		}

		let after = self.source[self.before_start..end].to_string();
		let nodes = self
			.stack
			.pop()
			.map(|frame| frame.nodes)
			.unwrap_or_default();

		Ok(Root { nodes, after })
	}
}

/// Split `text` into its leading whitespace and the rest.
fn split_leading_space(text: &str) -> (&str, &str) {
	let rest = text.trim_start();
	(&text[..text.len() - rest.len()], rest)
}
