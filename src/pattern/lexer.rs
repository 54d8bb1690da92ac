use super::{Error, Result};
use source_span::{Loc, Metrics, Position, Span};
use std::fmt;
use std::iter::Peekable;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
	/// Character, and whether it was escaped with a backslash.
	Char(char, bool),

	/// Reference to a named class (`$NAME`), without the `$`.
	Ident(String),

	/// The `IN` keyword of exclusions.
	In,

	/// One of `( ) [ ] * + | . - ^`.
	Punct(char),
}

impl Token {
	pub fn is_punct(&self, p: char) -> bool {
		match self {
			Token::Punct(c) => *c == p,
			_ => false,
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Token::*;
		match self {
			Char(c, true) => write!(f, "\\{}", c),
			Char(c, false) => c.fmt(f),
			Ident(name) => write!(f, "${}", name),
			In => write!(f, "IN"),
			Punct(p) => p.fmt(f),
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Delimiter {
	Parenthesis,
	Bracket,
}

impl Delimiter {
	pub fn begin(&self) -> char {
		match self {
			Delimiter::Parenthesis => '(',
			Delimiter::Bracket => '[',
		}
	}
}

/// Blank characters separating tokens.
pub fn is_blank(c: char) -> bool {
	c == ' ' || c == '\t' || c == '\r' || c == '\x0c'
}

pub fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_punct(c: char) -> bool {
	match c {
		'(' | ')' | '[' | ']' | '*' | '+' | '|' | '.' | '-' | '^' => true,
		_ => false,
	}
}

/// Splits a regular expression into tokens.
///
/// Blanks are skipped, and `%%` starts a comment running to the end of the line.
pub struct Lexer<I: Iterator<Item = char>, M: Metrics> {
	input: Peekable<I>,
	metrics: M,
	span: Span,
}

impl<I: Iterator<Item = char>, M: Metrics> Lexer<I, M> {
	pub fn new(input: I, position: Position, metrics: M) -> Lexer<I, M> {
		Lexer {
			input: input.peekable(),
			metrics,
			span: position.into(),
		}
	}

	/// Position right after the last consumed character.
	pub fn position(&self) -> Position {
		self.span.end()
	}

	fn peek(&mut self) -> Option<char> {
		self.input.peek().cloned()
	}

	fn consume(&mut self) -> Option<char> {
		let c = self.input.next()?;
		self.span.push(c, &self.metrics);
		Some(c)
	}

	fn skip_comment(&mut self) {
		while let Some(c) = self.peek() {
			if c == '\n' {
				break;
			}

			self.consume();
		}
	}

	fn skip_whitespaces(&mut self) {
		while let Some(c) = self.peek() {
			if is_blank(c) {
				self.consume();
			} else {
				break;
			}
		}
	}

	fn parse_ident(&mut self) -> Result<Loc<Token>> {
		let mut name = String::new();

		while let Some(c) = self.peek() {
			if is_ident_char(c) {
				self.consume();
				name.push(c)
			} else {
				break;
			}
		}

		if name.is_empty() {
			Err(Loc::new(Error::MissingClassName, self.span))
		} else {
			Ok(Loc::new(Token::Ident(name), self.span))
		}
	}

	fn parse_token(&mut self) -> Result<Option<Loc<Token>>> {
		loop {
			self.skip_whitespaces();
			self.span.clear();

			let c = match self.consume() {
				Some(c) => c,
				None => return Ok(None),
			};

			let token = match c {
				'%' if self.peek() == Some('%') => {
					self.skip_comment();
					continue;
				}
				'$' => return self.parse_ident().map(Some),
				'\\' => match self.consume() {
					Some(c) => Token::Char(c, true),
					None => return Err(Loc::new(Error::IncompleteEscape, self.span)),
				},
				'I' if self.peek() == Some('N') => {
					self.consume();
					Token::In
				}
				_ if is_punct(c) => Token::Punct(c),
				_ => Token::Char(c, false),
			};

			return Ok(Some(Loc::new(token, self.span)));
		}
	}
}

impl<I: Iterator<Item = char>, M: Metrics> Iterator for Lexer<I, M> {
	type Item = Result<Loc<Token>>;

	fn next(&mut self) -> Option<Self::Item> {
		self.parse_token().transpose()
	}
}
