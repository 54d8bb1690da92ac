use crate::pattern;
use source_span::Span;
use std::fmt;

#[derive(Debug)]
pub enum Error {
	/// Invalid regular expression.
	Pattern(pattern::Error),

	/// A line that is neither blank, a comment nor a definition.
	ExpectedIdentifier,

	/// A `$` not followed by a name.
	MissingIdentifier,

	InvalidIdentifier(String),

	/// The identifier is already defined, at the given span.
	AlreadyDefined(String, Span),
}

impl Error {
	pub fn format_notes(
		&self,
		fmt: &mut source_span::fmt::Formatter,
		style: source_span::fmt::Style,
	) {
		if let Error::AlreadyDefined(_, span) = self {
			fmt.add(*span, Some("first definition".to_string()), style)
		}
	}

	/// Suggestion on how to fix the error, if any.
	pub fn help(&self) -> Option<String> {
		use pattern::Error as P;
		match self {
			Error::ExpectedIdentifier => Some("definitions are written `$NAME regex`".to_string()),
			Error::Pattern(P::IllegalChar(c)) if pattern::RE_ESCAPES.contains(c) => {
				Some(format!("escape it with a backslash: `\\{}`", c))
			}
			Error::Pattern(P::IllegalEscape(c)) if !c.is_ascii_punctuation() && *c != ' ' => {
				Some(format!("remove the backslash before `{}`", c))
			}
			Error::Pattern(P::UndefinedClass(_)) => {
				Some("classes must be defined before they are used".to_string())
			}
			Error::Pattern(P::InvalidRange(first, last)) => {
				Some(format!("write the range the other way around: `{}-{}`", last, first))
			}
			_ => None,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			Pattern(e) => e.fmt(f),
			ExpectedIdentifier => write!(f, "lines must begin with an identifier"),
			MissingIdentifier => write!(f, "missing identifier name after `$`"),
			InvalidIdentifier(name) => write!(f, "invalid identifier `{}`", name),
			AlreadyDefined(name, _) => write!(f, "identifier `${}` is already defined", name),
		}
	}
}

impl From<pattern::Error> for Error {
	fn from(e: pattern::Error) -> Error {
		Error::Pattern(e)
	}
}
