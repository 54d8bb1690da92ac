//! Longest match scanner.
use crate::{pattern::lexer::is_blank, table::Table};
use source_span::{DefaultMetrics, Metrics, Span, DEFAULT_METRICS};
use std::io::{self, BufRead};

mod source;
mod token;

pub use source::*;
pub use token::*;

enum Phase {
	/// No token is pending.
	Reading,

	/// A token has been read but not returned yet.
	Emitting(Token),

	/// The end of the input has been reached.
	EndOfFile(Token),
}

/// Table walker.
///
/// Splits its input into tokens by walking the lexing table.
/// Each token is the longest prefix of the remaining input recognized by a
/// pattern. When the walk goes past the last accepting state, the walker
/// backs off to the end of the longest recognized prefix.
/// Characters starting no token are returned as [`Label::Invalid`] tokens.
/// Tokens never span more than one line.
pub struct Walker<'t, R, M = DefaultMetrics> {
	table: &'t Table,
	source: Source<R>,
	metrics: M,
	phase: Phase,

	/// Set once the iterator has yielded the end of file or an error.
	done: bool,
}

impl<'t, R: BufRead> Walker<'t, R> {
	pub fn new(table: &'t Table, reader: R) -> Walker<'t, R> {
		Self::with_metrics(table, reader, DEFAULT_METRICS)
	}
}

impl<'t, R: BufRead, M: Metrics> Walker<'t, R, M> {
	/// Creates a walker computing token spans with the given metrics.
	pub fn with_metrics(table: &'t Table, reader: R, metrics: M) -> Walker<'t, R, M> {
		Walker {
			table,
			source: Source::new(reader),
			metrics,
			phase: Phase::Reading,
			done: false,
		}
	}

	pub fn table(&self) -> &'t Table {
		self.table
	}

	/// Checks if there is a token other than the end of file left.
	///
	/// The next token is read but not consumed.
	pub fn has_next_token(&mut self) -> io::Result<bool> {
		Ok(!self.peek_token()?.is_eof())
	}

	/// Returns the next token without consuming it.
	pub fn peek_token(&mut self) -> io::Result<&Token> {
		if let Phase::Reading = self.phase {
			let token = self.read_token()?;
			self.phase = if token.is_eof() {
				Phase::EndOfFile(token)
			} else {
				Phase::Emitting(token)
			}
		}

		match &self.phase {
			Phase::Emitting(token) | Phase::EndOfFile(token) => Ok(token),
			Phase::Reading => unreachable!(),
		}
	}

	/// Consumes the next token.
	///
	/// Once the end of the input is reached, every call returns an end of file token.
	pub fn next_token(&mut self) -> io::Result<Token> {
		self.peek_token()?;

		match std::mem::replace(&mut self.phase, Phase::Reading) {
			Phase::Emitting(token) => Ok(token),
			Phase::EndOfFile(token) => {
				self.phase = Phase::EndOfFile(token.clone());
				Ok(token)
			}
			Phase::Reading => unreachable!(),
		}
	}

	fn token(&self, label: Label, start: usize, end: usize) -> Token {
		Token::new(
			label,
			self.source.slice(start, end),
			self.source.span(start, end, &self.metrics),
		)
	}

	fn end_of_file(&self) -> Token {
		let index = self.source.index();
		let span: Span = self.source.span(index, index, &self.metrics);
		Token::new(Label::Eof, String::new(), span)
	}

	fn read_token(&mut self) -> io::Result<Token> {
		loop {
			match self.source.peek() {
				Some(c) if is_blank(c) => {
					self.source.bump();
				}
				Some(_) => break,
				None => {
					if !self.source.advance()? {
						log::trace!("end of file");
						return Ok(self.end_of_file());
					}
				}
			}
		}

		let dfa = self.table.dfa();
		let start = self.source.index();
		let mut q = dfa.start();
		let mut longest = None;

		while let Some(c) = self.source.peek() {
			match dfa.next_state(q, c) {
				Some(next) => {
					self.source.bump();
					q = next;
					if dfa.is_accepting(q) {
						longest = Some((self.source.index(), q))
					}
				}
				None => break,
			}
		}

		match longest {
			Some((end, accepting)) => {
				if end < self.source.index() {
					log::trace!(
						"backing off from {} to {}",
						self.source.index(),
						end
					);
					self.source.seek(end)
				}

				let label = match self.table.label(accepting) {
					Some(id) => Label::Pattern(id.to_string()),
					None => Label::Invalid,
				};

				Ok(self.token(label, start, end))
			}
			None => {
				// the failing character, if the walk did not stop at the end of the line.
				self.source.bump();
				Ok(self.token(Label::Invalid, start, self.source.index()))
			}
		}
	}
}

impl<'t, R: BufRead, M: Metrics> Iterator for Walker<'t, R, M> {
	type Item = io::Result<Token>;

	fn next(&mut self) -> Option<io::Result<Token>> {
		if self.done {
			return None;
		}

		let result = self.next_token();
		match &result {
			Ok(token) => self.done = token.is_eof(),
			Err(_) => self.done = true,
		}

		Some(result)
	}
}
