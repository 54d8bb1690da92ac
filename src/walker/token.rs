use source_span::Span;
use std::fmt;

/// Label of the end of input token.
pub const EOF: &str = "<EOF>";

/// Label of tokens recognized by no pattern.
pub const INVALID: &str = "<INVALID>";

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Label {
	/// Identifier of the recognized pattern.
	Pattern(String),

	Invalid,

	Eof,
}

impl Label {
	pub fn as_str(&self) -> &str {
		match self {
			Label::Pattern(id) => id.as_str(),
			Label::Invalid => INVALID,
			Label::Eof => EOF,
		}
	}

	pub fn is_eof(&self) -> bool {
		*self == Label::Eof
	}

	pub fn is_invalid(&self) -> bool {
		*self == Label::Invalid
	}
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

/// Scanned token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
	label: Label,
	lexeme: String,
	span: Span,
}

impl Token {
	pub fn new(label: Label, lexeme: String, span: Span) -> Token {
		Token {
			label,
			lexeme,
			span,
		}
	}

	pub fn label(&self) -> &Label {
		&self.label
	}

	/// The exact scanned text.
	pub fn lexeme(&self) -> &str {
		&self.lexeme
	}

	pub fn span(&self) -> Span {
		self.span
	}

	pub fn is_eof(&self) -> bool {
		self.label.is_eof()
	}

	pub fn into_parts(self) -> (Label, String) {
		(self.label, self.lexeme)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}\t{}", self.label, self.lexeme)
	}
}
