use super::lexer::{Delimiter, Token};
use source_span::Loc;
use std::fmt;

#[derive(Debug)]
pub enum Error {
	/// The expression ended where something was still expected.
	UnexpectedEnd,

	Unexpected(Token),

	/// An opened delimiter is never closed.
	MissingCloser(Delimiter),

	/// A backslash at the very end of the expression.
	IncompleteEscape,

	/// A `$` not followed by a class name.
	MissingClassName,

	IllegalEscape(char),

	IllegalChar(char),

	/// An excluded set not followed by `IN`.
	MissingIn,

	UndefinedClass(String),

	/// An empty expression, group or alternative.
	EmptyExpression,

	/// A character class without any character.
	EmptyCharSet,

	/// A range whose first character comes after its last.
	InvalidRange(char, char),
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			UnexpectedEnd => write!(f, "unexpected end of expression"),
			Unexpected(token) => write!(f, "unexpected `{}`", token),
			MissingCloser(delimiter) => write!(f, "unclosed `{}`", delimiter.begin()),
			IncompleteEscape => write!(f, "incomplete escape sequence"),
			MissingClassName => write!(f, "missing class name after `$`"),
			IllegalEscape(c) => write!(f, "`{}` cannot be escaped here", c.escape_default()),
			IllegalChar(c) => write!(f, "illegal character `{}`", c.escape_default()),
			MissingIn => write!(f, "expected `IN` after the excluded set"),
			UndefinedClass(name) => write!(f, "undefined class `${}`", name),
			EmptyExpression => write!(f, "empty expression"),
			EmptyCharSet => write!(f, "empty character class"),
			InvalidRange(first, last) => write!(
				f,
				"invalid range `{}-{}`",
				first.escape_default(),
				last.escape_default()
			),
		}
	}
}
