use source_span::{Metrics, Position, Span};
use std::io::{self, BufRead};

/// Line buffer over some input.
///
/// Characters of the current line can be read and re-read in any order,
/// lines are read one at a time when the walker asks for the next one.
pub struct Source<R> {
	reader: R,

	/// Current line, without its terminator.
	line: Vec<char>,

	/// Index of the next character in the current line.
	index: usize,

	/// Number of lines read so far.
	lines: usize,

	buffer: Vec<u8>,
}

impl<R: BufRead> Source<R> {
	/// Creates a new source. No line is read until [`Source::advance`] is called.
	pub fn new(reader: R) -> Source<R> {
		Source {
			reader,
			line: Vec::new(),
			index: 0,
			lines: 0,
			buffer: Vec::new(),
		}
	}

	/// Reads the next line.
	///
	/// Returns `false` when the input is exhausted.
	/// Invalid UTF-8 sequences are replaced with `U+FFFD`.
	pub fn advance(&mut self) -> io::Result<bool> {
		self.buffer.clear();
		self.line.clear();
		self.index = 0;

		if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
			return Ok(false);
		}

		if self.buffer.last() == Some(&b'\n') {
			self.buffer.pop();
			if self.buffer.last() == Some(&b'\r') {
				self.buffer.pop();
			}
		}

		self.line.extend(String::from_utf8_lossy(&self.buffer).chars());
		self.lines += 1;
		Ok(true)
	}

	/// Next character of the current line, if any.
	pub fn peek(&self) -> Option<char> {
		self.line.get(self.index).cloned()
	}

	pub fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.index += 1;
		Some(c)
	}

	pub fn index(&self) -> usize {
		self.index
	}

	/// Moves the cursor in the current line.
	pub fn seek(&mut self, index: usize) {
		self.index = std::cmp::min(index, self.line.len())
	}

	/// Index of the current line, starting from 0.
	pub fn line_number(&self) -> usize {
		self.lines.saturating_sub(1)
	}

	/// Characters of the current line between the given indexes.
	pub fn slice(&self, start: usize, end: usize) -> String {
		self.line[start..end].iter().collect()
	}

	/// Span of the characters of the current line between the given indexes.
	pub fn span<M: Metrics>(&self, start: usize, end: usize, metrics: &M) -> Span {
		let mut position = Position::new(self.line_number(), 0);
		for c in &self.line[..start] {
			position = position.next(*c, metrics)
		}

		let mut span: Span = position.into();
		for c in &self.line[start..end] {
			span.push(*c, metrics)
		}

		span
	}
}
