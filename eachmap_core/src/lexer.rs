use std::ops::Range;

use logos::Logos;

use crate::EachInMapError;
use crate::EachInMapResult;

/// Flat tokens for stylesheet source.
///
/// Only the characters that give a stylesheet its structure get their own
/// token; everything else is a `Word`. Whitespace is kept as a token so the
/// parser can hand it back out as raws.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
	#[regex(r"[ \t\r\n\x0C]+")]
	Space,
	#[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
	Comment,
	/// `/*` without a matching `*/`.
	#[token("/*")]
	CommentOpen,
	#[regex(r#""([^"\\\n]|\\(.|\r\n|\n))*""#)]
	#[regex(r"'([^'\\\n]|\\(.|\r\n|\n))*'")]
	String,
	#[token("{")]
	OpenCurly,
	#[token("}")]
	CloseCurly,
	#[token(";")]
	Semicolon,
	#[token(":")]
	Colon,
	#[token("(")]
	OpenParen,
	#[token(")")]
	CloseParen,
	/// `@name`
	#[regex(r"@[a-zA-Z0-9_-]+")]
	AtWord,
	#[regex(r#"[^ \t\r\n\x0C{};:()"'/@]+"#)]
	Word,
	/// A lone `/` or `@`.
	#[token("/")]
	#[token("@")]
	Symbol,
}

/// A token together with its byte span in the source.
pub(crate) type SpannedToken = (RawToken, Range<usize>);

/// Tokenize stylesheet source. Fails on unterminated strings and comments.
pub(crate) fn tokenize(source: &str) -> EachInMapResult<Vec<SpannedToken>> {
	let mut tokens = vec![];

	for (token, span) in RawToken::lexer(source).spanned() {
		match token {
			Ok(RawToken::CommentOpen) => {
				return Err(EachInMapError::Unterminated {
					kind: "comment",
					span: (span.start, source.len() - span.start).into(),
				});
			}
			Ok(token) => tokens.push((token, span)),
			// Quotes are the only characters no token accepts on their own.
			Err(()) => {
				return Err(EachInMapError::Unterminated {
					kind: "string",
					span: (span.start, span.len()).into(),
				});
			}
		}
	}

	Ok(tokens)
}
