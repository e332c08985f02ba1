use miette::Diagnostic;
use miette::SourceSpan;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EachInMapError {
	#[error(transparent)]
	#[diagnostic(code(eachmap::io_error))]
	Io(#[from] std::io::Error),

	#[error("Missed \"in\" keyword in @each-in-map")]
	#[diagnostic(
		code(eachmap::missing_keyword),
		help("separate the variables from the table name: `@each-in-map $key, $value in table`")
	)]
	MissingKeyword {
		#[label("no `in` keyword in these params")]
		span: SourceSpan,
	},

	#[error("Missed variable names in @each-in-map")]
	#[diagnostic(
		code(eachmap::missing_variables),
		help("list one or more `$`-prefixed variables before `in`, e.g. `$key, $value`")
	)]
	MissingVariables {
		#[label("expected `$name` variables here")]
		span: SourceSpan,
	},

	#[error("Missed map in @each-in-map")]
	#[diagnostic(
		code(eachmap::missing_table),
		help("name the table to iterate after `in`, e.g. `in display_types`")
	)]
	MissingTable {
		#[label("expected a table name here")]
		span: SourceSpan,
	},

	#[error("table `{name}` not found in the maps document")]
	#[diagnostic(code(eachmap::table_not_found), help("available tables: {available}"))]
	TableNotFound {
		name: String,
		available: String,
		#[label("unknown table")]
		span: SourceSpan,
	},

	#[error("failed to load maps document `{path}`: {reason}")]
	#[diagnostic(
		code(eachmap::table_document),
		help(
			"the maps document must be a JSON object of tables, each mapping keys to a string, a \
			 number, or an array of strings and numbers"
		)
	)]
	TableDocument { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(eachmap::config_parse),
		help("check that eachmap.toml is valid TOML with optional `base_path` and `json_path` keys")
	)]
	ConfigParse(String),

	#[error("unclosed block")]
	#[diagnostic(code(eachmap::unclosed_block), help("add a matching `}}`"))]
	UnclosedBlock {
		#[label("this block is never closed")]
		span: SourceSpan,
	},

	#[error("unexpected `}}`")]
	#[diagnostic(code(eachmap::unexpected_close_brace))]
	UnexpectedCloseBrace {
		#[label("no open block to close")]
		span: SourceSpan,
	},

	#[error("unknown word `{word}`")]
	#[diagnostic(
		code(eachmap::unknown_word),
		help("declarations need a `property: value` pair")
	)]
	UnknownWord {
		word: String,
		#[label("expected a declaration")]
		span: SourceSpan,
	},

	#[error("unterminated {kind}")]
	#[diagnostic(code(eachmap::unterminated))]
	Unterminated {
		kind: &'static str,
		#[label("starts here")]
		span: SourceSpan,
	},
}

impl EachInMapError {
	/// The source span this error points at, for errors raised while
	/// processing a stylesheet.
	pub fn span(&self) -> Option<SourceSpan> {
		match self {
			Self::MissingKeyword { span }
			| Self::MissingVariables { span }
			| Self::MissingTable { span }
			| Self::TableNotFound { span, .. }
			| Self::UnclosedBlock { span }
			| Self::UnexpectedCloseBrace { span }
			| Self::UnknownWord { span, .. }
			| Self::Unterminated { span, .. } => Some(*span),
			Self::Io(_) | Self::TableDocument { .. } | Self::ConfigParse(_) => None,
		}
	}
}

pub type EachInMapResult<T> = Result<T, EachInMapError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
