//! Lexical specifications.
//!
//! A specification is a list of named regular expressions, one per line:
//!
//! ```text
//! %% character classes
//! $DIGIT [0-9]
//! $NON-ZERO [^0] IN $DIGIT
//!
//! %% token classes
//! $NUM $NON-ZERO $DIGIT* | 0
//! ```
//!
//! Definitions before the first blank line are character classes, which can be
//! referenced by later patterns but never produce tokens.
//! Every definition after it is a token class.
use crate::{
	automaton::Nfa,
	pattern::{
		self,
		lexer::{is_blank, is_ident_char},
		Classes,
	},
};
use source_span::{DefaultMetrics, Loc, Metrics, Position, Span, DEFAULT_METRICS};

mod error;

pub use error::*;

pub type Result<T> = std::result::Result<T, Loc<Error>>;

/// Ordered list of named patterns.
#[derive(Default)]
pub struct Spec {
	/// Compiled definitions, located by their identifier.
	definitions: Vec<Loc<Nfa>>,
}

impl Spec {
	pub fn new() -> Spec {
		Spec {
			definitions: Vec::new(),
		}
	}

	/// Parses a specification file content, with a tab stop of 4.
	pub fn parse(input: &str) -> Result<Spec> {
		Self::parse_with(input, DefaultMetrics::with_tab_stop(4))
	}

	pub fn parse_with<M: Metrics + Clone>(input: &str, metrics: M) -> Result<Spec> {
		let mut spec = Spec::new();
		let mut char_classes = true;

		for (i, line) in input.lines().enumerate() {
			let mut span: Span = Position::new(i, 0).into();

			let mut offset = 0;
			for c in line.chars().take_while(|c| is_blank(*c)) {
				span.push(c, &metrics);
				offset += c.len_utf8();
			}

			let content = &line[offset..];
			span.clear();

			if content.is_empty() {
				if char_classes && !spec.is_empty() {
					log::debug!("character classes end at line {}", i + 1);
					char_classes = false
				}

				continue;
			}

			if content.starts_with("%%") {
				continue;
			}

			if !content.starts_with('$') {
				if let Some(c) = content.chars().next() {
					span.push(c, &metrics)
				}

				return Err(Loc::new(Error::ExpectedIdentifier, span));
			}

			let name: String = content[1..].chars().take_while(|c| is_ident_char(*c)).collect();
			span.push('$', &metrics);
			for c in name.chars() {
				span.push(c, &metrics)
			}

			if name.is_empty() {
				return Err(Loc::new(Error::MissingIdentifier, span));
			}

			let regex = &content[(1 + name.len())..];
			spec.define_at(name, regex, char_classes, span, metrics.clone())?
		}

		Ok(spec)
	}

	/// Compiles and adds a new definition.
	pub fn define<S: Into<String>>(&mut self, name: S, regex: &str, char_class: bool) -> Result<()> {
		let name = name.into();
		if name.is_empty() {
			return Err(Loc::new(Error::MissingIdentifier, Span::default()));
		}

		if !name.chars().all(is_ident_char) {
			return Err(Loc::new(Error::InvalidIdentifier(name), Span::default()));
		}

		self.define_at(name, regex, char_class, Span::default(), DEFAULT_METRICS)
	}

	/// Adds a definition whose identifier is located at `span`.
	///
	/// The regular expression is assumed to start right after the identifier.
	fn define_at<M: Metrics>(
		&mut self,
		name: String,
		regex: &str,
		char_class: bool,
		span: Span,
		metrics: M,
	) -> Result<()> {
		if let Some(previous) = self.definition(&name) {
			return Err(Loc::new(Error::AlreadyDefined(name, previous.span()), span));
		}

		let mut nfa = pattern::compile_at(regex, span.end(), metrics, self).map_err(|e| {
			let span = e.span();
			Loc::new(Error::Pattern(e.into_inner()), span)
		})?;

		log::debug!(
			"defined {} `{}` ({} states)",
			if char_class { "character class" } else { "token class" },
			name,
			nfa.len()
		);

		nfa.set_identifier(name);
		nfa.set_char_class(char_class);
		self.definitions.push(Loc::new(nfa, span));
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Returns the located definition of the given identifier.
	pub fn definition(&self, name: &str) -> Option<&Loc<Nfa>> {
		self.definitions
			.iter()
			.find(|nfa| nfa.identifier() == Some(name))
	}

	/// Every definition, in declaration order.
	pub fn definitions(&self) -> impl Iterator<Item = &Nfa> {
		self.definitions.iter().map(|nfa| nfa.as_ref())
	}

	pub fn character_classes(&self) -> impl Iterator<Item = &Nfa> {
		self.definitions().filter(|nfa| nfa.is_char_class())
	}

	pub fn token_classes(&self) -> impl Iterator<Item = &Nfa> {
		self.definitions().filter(|nfa| !nfa.is_char_class())
	}
}

impl Classes for Spec {
	fn class(&self, name: &str) -> Option<&Nfa> {
		self.definition(name).map(|nfa| nfa.as_ref())
	}
}
