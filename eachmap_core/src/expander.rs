use miette::SourceSpan;

use crate::AtRule;
use crate::AtRuleRaws;
use crate::EachInMapError;
use crate::EachInMapOptions;
use crate::EachInMapResult;
use crate::Node;
use crate::Projection;
use crate::Root;
use crate::Tables;
use crate::parse;
use crate::parse_header;
use crate::render_params;

/// The at-rule this crate expands.
pub const EACH_IN_MAP: &str = "each-in-map";
/// The at-rule it expands into.
pub const EACH: &str = "each";

/// The span of an at-rule's `@name params` header, used for labels.
pub fn header_span(at_rule: &AtRule) -> SourceSpan {
	let len = if at_rule.params.is_empty() {
		1 + at_rule.name.len()
	} else {
		1 + at_rule.name.len() + at_rule.raws.after_name.len() + at_rule.params.len()
	};

	SourceSpan::new(at_rule.position.start.offset.into(), len)
}

/// Compute the `@each` params for an `@each-in-map` at-rule without touching
/// the tree.
pub fn expand_params(at_rule: &AtRule, tables: &Tables) -> EachInMapResult<String> {
	let span = header_span(at_rule);
	let header = parse_header(&at_rule.params, span)?;
	let table_name = header.table_name();
	let table = tables
		.table(table_name)
		.ok_or_else(|| EachInMapError::TableNotFound {
			name: table_name.to_string(),
			available: tables.names(),
			span,
		})?;

	let projection = Projection::new(table, header.value_names().len());
	Ok(render_params(&header, &projection))
}

/// Replace an `@each-in-map` node with the equivalent `@each` node.
///
/// The replacement keeps the original position and whitespace, and takes
/// ownership of the original children without copying them. Directives
/// nested in those children are left for the caller's walk. Nodes that are
/// not `@each-in-map` at-rules are ignored. On error the node is unchanged.
pub fn expand_directive(node: &mut Node, tables: &Tables) -> EachInMapResult<()> {
	let Node::AtRule(directive) = node else {
		return Ok(());
	};

	if directive.name != EACH_IN_MAP {
		return Ok(());
	}

	let params = expand_params(directive, tables)?;

	tracing::debug!(
		line = directive.position.start.line,
		column = directive.position.start.column,
		from = %directive.params,
		to = %params,
		"expanded @each-in-map"
	);

	let replacement = AtRule {
		name: EACH.to_string(),
		params,
		nodes: directive.nodes.take(),
		raws: AtRuleRaws {
			after_name: " ".to_string(),
			..std::mem::take(&mut directive.raws)
		},
		position: directive.position,
	};

	*node = Node::AtRule(replacement);

	Ok(())
}

/// Expand every `@each-in-map` directive in `root`, stopping at the first
/// error. Returns the number of directives expanded.
pub fn expand_root(root: &mut Root, tables: &Tables) -> EachInMapResult<usize> {
	let mut count = 0;

	root.walk_at_rules_mut(EACH_IN_MAP, |node| {
		expand_directive(node, tables)?;
		count += 1;
		Ok::<(), EachInMapError>(())
	})?;

	Ok(count)
}

/// Parse `source`, expand every directive against `tables` and print the
/// result.
pub fn process(source: &str, tables: &Tables) -> EachInMapResult<String> {
	let mut root = parse(source)?;
	expand_root(&mut root, tables)?;
	Ok(root.to_css())
}

/// Expands `@each-in-map` directives using a maps document on disk.
///
/// The maps document is read at the start of every [`EachInMap::process`]
/// call and dropped when it returns, so each document sees the file as it
/// was when its processing began.
#[derive(Debug, Clone, Default)]
pub struct EachInMap {
	options: EachInMapOptions,
}

impl EachInMap {
	pub fn new(options: EachInMapOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &EachInMapOptions {
		&self.options
	}

	/// Load the maps document, then expand every directive in `source`.
	pub fn process(&self, source: &str) -> EachInMapResult<String> {
		let tables = self.options.load_tables()?;
		process(source, &tables)
	}
}
