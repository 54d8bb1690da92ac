//! Diagnostics output.
use crate::spec;
use source_span::{
	fmt::{Formatter, Style},
	Loc, Metrics, Span,
};
use std::fmt;
use yansi::Paint;

pub enum Type {
	Warning,
	Error,
}

impl Type {
	fn style(&self) -> Style {
		match self {
			Self::Warning => Style::Warning,
			Self::Error => Style::Error,
		}
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Warning => write!(f, "{}", Paint::yellow("warning").bold()),
			Self::Error => write!(f, "{}", Paint::red("error").bold()),
		}
	}
}

/// Diagnostic block: a title, highlighted source excerpts and notes.
pub struct Block {
	ty: Type,
	title: String,
	source: Option<String>,
	highlights: Formatter,
	notes: Vec<Note>,
}

impl Block {
	pub fn new<S: ToString>(ty: Type, title: S) -> Block {
		Block {
			ty,
			title: title.to_string(),
			source: None,
			highlights: Formatter::new(),
			notes: Vec::new(),
		}
	}

	/// Error block for a specification error.
	pub fn from_spec_error(e: &Loc<spec::Error>) -> Block {
		let mut block = Block::new(Type::Error, e.as_ref());
		block.highlight(e.span(), None);
		e.format_notes(&mut block.highlights, Style::Note);

		if let Some(help) = e.help() {
			block.add_note(NoteType::Help, help)
		}

		block
	}

	/// Warning about a token class accepting the empty string.
	pub fn empty_token_class(id: &str, span: Span) -> Block {
		let mut block = Block::new(Type::Warning, format!("token class `{}` accepts the empty string", id));
		block.highlight(span, Some("defined here".to_string()));
		block.add_note(NoteType::Note, "the empty string is never scanned as a token");
		block
	}

	/// Sets the name of the file the highlights refer to.
	pub fn set_source<S: ToString>(&mut self, source: S) {
		self.source = Some(source.to_string())
	}

	/// Highlights a span with the style of the block type.
	pub fn highlight(&mut self, span: Span, label: Option<String>) {
		let style = self.ty.style();
		self.highlights.add(span, label, style)
	}

	pub fn add_note<S: ToString>(&mut self, ty: NoteType, content: S) {
		self.notes.push(Note {
			ty,
			content: content.to_string(),
		})
	}

	pub fn render<E, I: Iterator<Item = Result<char, E>>, M: Metrics>(
		&self,
		input: I,
		span: Span,
		metrics: &M,
	) -> Result<Formatted, E> {
		let margin_len = self.highlights.margin_len(&span);

		Ok(Formatted {
			block: self,
			margin_len: if margin_len >= 2 { margin_len - 2 } else { 0 },
			highlights: self.highlights.render(input, span, metrics)?,
		})
	}
}

pub struct Formatted<'a> {
	block: &'a Block,
	margin_len: usize,
	highlights: source_span::fmt::Formatted,
}

impl<'a> fmt::Display for Formatted<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let tab = " ".repeat(self.margin_len);

		write!(
			f,
			"{}{} {}\n",
			self.block.ty,
			Paint::new(':').bold(),
			Paint::new(&self.block.title).bold()
		)?;

		if let Some(source) = &self.block.source {
			write!(f, "{}--> {}\n", tab, source)?
		}

		write!(f, "{}{}", tab, Paint::blue('|').bold())?;
		self.highlights.fmt(f)?;
		write!(f, "{}{}\n", tab, Paint::blue('|').bold())?;

		for note in &self.block.notes {
			for (i, line) in note.content.lines().enumerate() {
				if i == 0 {
					write!(f, "{}= {}: {}\n", tab, note.ty, line)?;
				} else {
					write!(f, "{}  {}\n", tab, line)?
				}
			}
		}

		Ok(())
	}
}

pub enum NoteType {
	Note,
	Help,
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Note => write!(f, "{}", Paint::new("note").bold()),
			Self::Help => write!(f, "{}", Paint::green("help").bold()),
		}
	}
}

struct Note {
	ty: NoteType,
	content: String,
}
