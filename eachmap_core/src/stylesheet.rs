use std::fmt::Display;

use crate::Position;

/// A parsed stylesheet.
///
/// The tree is lossless: every node keeps the whitespace that surrounded it
/// in the source (its "raws"), so printing an untouched tree reproduces the
/// input exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
	/// Top level nodes in source order.
	pub nodes: Vec<Node>,
	/// Whitespace after the last node.
	pub after: String,
}

/// A node in the stylesheet tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Node {
	/// `@name params;` or `@name params { ... }`
	AtRule(AtRule),
	/// `selector { ... }`
	Rule(Rule),
	/// `prop: value;`
	Declaration(Declaration),
	/// `/* text */`
	Comment(Comment),
}

/// An at-rule such as `@media screen { ... }` or `@each-in-map $k in t { ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtRule {
	/// The name without the leading `@`.
	pub name: String,
	/// Everything between the name and the block or semicolon, trimmed.
	pub params: String,
	/// Child nodes. `None` for statement at-rules like `@import "a.css";`.
	pub nodes: Option<Vec<Node>>,
	pub raws: AtRuleRaws,
	pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtRuleRaws {
	/// Whitespace before the `@`.
	pub before: String,
	/// Whitespace between the name and the params.
	pub after_name: String,
	/// Whitespace between the params and `{` or `;`.
	pub between: String,
	/// Whitespace between the last child and `}`.
	pub after: String,
	/// Whether a statement at-rule ends with `;`.
	pub semicolon: bool,
}

/// A qualified rule: a selector followed by a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
	pub selector: String,
	pub nodes: Vec<Node>,
	pub raws: RuleRaws,
	pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRaws {
	pub before: String,
	/// Whitespace between the selector and `{`.
	pub between: String,
	/// Whitespace between the last child and `}`.
	pub after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
	pub prop: String,
	/// The value, including any `!important` flag.
	pub value: String,
	pub raws: DeclarationRaws,
	pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationRaws {
	pub before: String,
	/// The colon and the whitespace around it, e.g. `": "`.
	pub between: String,
	/// Whitespace between the value and `;`.
	pub after_value: String,
	pub semicolon: bool,
}

/// A `/* ... */` comment, stored with its delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
	pub text: String,
	pub before: String,
	pub position: Position,
}

impl Node {
	pub fn position(&self) -> Position {
		match self {
			Node::AtRule(at_rule) => at_rule.position,
			Node::Rule(rule) => rule.position,
			Node::Declaration(declaration) => declaration.position,
			Node::Comment(comment) => comment.position,
		}
	}

	/// The child nodes of this node, if it is a container.
	pub fn children(&self) -> Option<&[Node]> {
		match self {
			Node::AtRule(at_rule) => at_rule.nodes.as_deref(),
			Node::Rule(rule) => Some(rule.nodes.as_slice()),
			Node::Declaration(_) | Node::Comment(_) => None,
		}
	}

	pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
		match self {
			Node::AtRule(at_rule) => at_rule.nodes.as_mut(),
			Node::Rule(rule) => Some(&mut rule.nodes),
			Node::Declaration(_) | Node::Comment(_) => None,
		}
	}

	fn write_to(&self, out: &mut String) {
		match self {
			Node::AtRule(at_rule) => at_rule.write_to(out),
			Node::Rule(rule) => rule.write_to(out),
			Node::Declaration(declaration) => declaration.write_to(out),
			Node::Comment(comment) => {
				out.push_str(&comment.before);
				out.push_str(&comment.text);
			}
		}
	}
}

impl AtRule {
	fn write_to(&self, out: &mut String) {
		out.push_str(&self.raws.before);
		out.push('@');
		out.push_str(&self.name);
		if !self.params.is_empty() {
			out.push_str(&self.raws.after_name);
			out.push_str(&self.params);
		}
		out.push_str(&self.raws.between);

		match &self.nodes {
			Some(nodes) => write_block(out, nodes, &self.raws.after),
			None if self.raws.semicolon => out.push(';'),
			None => {}
		}
	}
}

impl Rule {
	fn write_to(&self, out: &mut String) {
		out.push_str(&self.raws.before);
		out.push_str(&self.selector);
		out.push_str(&self.raws.between);
		write_block(out, &self.nodes, &self.raws.after);
	}
}

impl Declaration {
	fn write_to(&self, out: &mut String) {
		out.push_str(&self.raws.before);
		out.push_str(&self.prop);
		out.push_str(&self.raws.between);
		out.push_str(&self.value);
		out.push_str(&self.raws.after_value);
		if self.raws.semicolon {
			out.push(';');
		}
	}
}

fn write_block(out: &mut String, nodes: &[Node], after: &str) {
	out.push('{');
	for node in nodes {
		node.write_to(out);
	}
	out.push_str(after);
	out.push('}');
}

impl Root {
	/// Print the tree back to stylesheet source.
	pub fn to_css(&self) -> String {
		let mut out = String::new();
		for node in &self.nodes {
			node.write_to(&mut out);
		}
		out.push_str(&self.after);
		out
	}

	/// Visit every at-rule called `name`, depth first and in document order.
	///
	/// The callback may replace the node it is handed. Whatever node sits in
	/// that slot afterwards has its children visited, so directives nested
	/// inside a replacement are still reached. The walk stops at the first
	/// error.
	pub fn walk_at_rules_mut<E>(
		&mut self,
		name: &str,
		mut visit: impl FnMut(&mut Node) -> Result<(), E>,
	) -> Result<(), E> {
		walk_nodes(&mut self.nodes, name, &mut visit)
	}

	/// Collect every at-rule called `name`, depth first and in document
	/// order.
	pub fn at_rules(&self, name: &str) -> Vec<&AtRule> {
		let mut found = vec![];
		collect_at_rules(&self.nodes, name, &mut found);
		found
	}
}

fn walk_nodes<E>(
	nodes: &mut [Node],
	name: &str,
	visit: &mut impl FnMut(&mut Node) -> Result<(), E>,
) -> Result<(), E> {
	for node in nodes {
		if matches!(node, Node::AtRule(at_rule) if at_rule.name == name) {
			visit(node)?;
		}

		if let Some(children) = node.children_mut() {
			walk_nodes(children, name, visit)?;
		}
	}

	Ok(())
}

fn collect_at_rules<'a>(nodes: &'a [Node], name: &str, found: &mut Vec<&'a AtRule>) {
	for node in nodes {
		match node {
			Node::AtRule(at_rule) if at_rule.name == name => found.push(at_rule),
			_ => {}
		}

		if let Some(children) = node.children() {
			collect_at_rules(children, name, found);
		}
	}
}

impl Display for Root {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_css())
	}
}

impl Display for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut out = String::new();
		self.write_to(&mut out);
		f.write_str(&out)
	}
}
