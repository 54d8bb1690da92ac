//! Regular expression compiler.
//!
//! Compiles a pattern into a [`Nfa`] with a single recursive descent pass:
//! there is no intermediate syntax tree, states and transitions are created
//! while the expression is parsed.
//!
//! ```text
//! regex  ::= union
//! union  ::= concat ('|' concat)*
//! concat ::= atom+
//! atom   ::= (char | '(' union ')' | class) ('*' | '+')?
//! class  ::= '.' | '$' NAME | '[' set ']'
//! set    ::= '^' chars ']' 'IN' ('[' chars ']' | '$' NAME) | chars
//! chars  ::= (char | char '-' char)+
//! ```
//!
//! Outside brackets, `-`, `^` and `IN` are literals.
//! Inside brackets, `( ) * + | .` and `IN` are literals.
use crate::{
	automaton::{Nfa, StateId, EPSILON},
	charset::{is_printable, CharSet},
};
use source_span::{Loc, Metrics, Position, Span, DEFAULT_METRICS};
use std::mem;

mod error;
pub mod lexer;

pub use error::*;
use lexer::{Delimiter, Lexer, Token};

/// Characters that may be escaped outside of brackets.
pub const RE_ESCAPES: &[char] = &[
	' ', '\\', '*', '+', '?', '$', '|', '[', ']', '(', ')', '.', '\'', '"',
];

/// Characters that may be escaped inside brackets.
pub const CLS_ESCAPES: &[char] = &[' ', '\\', '^', '-', '[', ']'];

/// Characters that must be escaped outside of brackets.
const RE_RESERVED: &[char] = &['?', '\'', '"'];

/// Named classes that a pattern may refer to with `$NAME`.
pub trait Classes {
	fn class(&self, name: &str) -> Option<&Nfa>;
}

impl Classes for [Nfa] {
	fn class(&self, name: &str) -> Option<&Nfa> {
		self.iter().find(|nfa| nfa.identifier() == Some(name))
	}
}

impl Classes for Vec<Nfa> {
	fn class(&self, name: &str) -> Option<&Nfa> {
		self.as_slice().class(name)
	}
}

/// Compiles `regex`, resolving class references in `classes`.
pub fn compile<C: Classes + ?Sized>(regex: &str, classes: &C) -> Result<Nfa> {
	compile_at(regex, Position::default(), DEFAULT_METRICS, classes)
}

/// Compiles `regex`, located at `position` in some larger source.
///
/// Errors are located relative to `position`.
pub fn compile_at<C: Classes + ?Sized, M: Metrics>(
	regex: &str,
	position: Position,
	metrics: M,
	classes: &C,
) -> Result<Nfa> {
	let mut parser = Parser {
		lexer: Lexer::new(regex.chars(), position, metrics),
		lookahead: None,
		classes,
	};

	let mut context = Context::new();
	parser.union(&mut context)?;

	match parser.consume()? {
		Some(token) => {
			let span = token.span();
			Err(Loc::new(Error::Unexpected(token.into_inner()), span))
		}
		None => Ok(context.into_nfa()),
	}
}

/// Outer construction suspended while a group is parsed.
struct Frame {
	nfa: Nfa,
	current: StateId,
}

/// Construction context, threaded through the parsing functions.
///
/// `nfa` is the automaton under construction for the innermost open group,
/// `current` its frontier state, and `prev` the state from which the last atom
/// was reached, target of the back-edges added by `*` and `+`.
struct Context {
	nfa: Nfa,
	current: StateId,
	prev: Option<StateId>,
}

impl Context {
	fn new() -> Context {
		let nfa = Nfa::new();
		let current = nfa.start();
		Context {
			nfa,
			current,
			prev: None,
		}
	}

	/// Returns the state a new atom can be attached to.
	///
	/// The start state and states that already have outgoing transitions are
	/// never extended directly: a fresh state is inserted after an epsilon
	/// transition, so that a later loop on the new atom cannot reach what the
	/// frontier was already connected to.
	fn isolated_frontier(&mut self) -> StateId {
		let q = self.current;
		self.nfa.set_accepting(q, false);

		if q == self.nfa.start() || self.nfa.state(q).has_transitions() {
			let entry = self.nfa.add_state(false);
			self.nfa.add_transition(q, EPSILON, entry);
			entry
		} else {
			q
		}
	}

	/// Appends an atom matching any character of `set`.
	fn concat(&mut self, set: &CharSet) {
		let from = self.isolated_frontier();
		let to = self.nfa.add_state(true);

		for c in set.chars() {
			self.nfa.add_transition(from, c, to);
		}

		self.prev = Some(from);
		self.current = to;
	}

	fn star(&mut self) {
		if let Some(prev) = self.prev {
			self.nfa.add_transition(prev, EPSILON, self.current);
			self.nfa.add_transition(self.current, EPSILON, prev);
		}
	}

	fn plus(&mut self) {
		if let Some(prev) = self.prev {
			self.nfa.add_transition(self.current, EPSILON, prev);
		}
	}

	/// Starts a new alternative from the start state.
	fn union(&mut self) {
		let start = self.nfa.start();
		let q = self.nfa.add_state(false);
		self.nfa.add_transition(start, EPSILON, q);
		self.current = q;
		self.prev = None;
	}

	fn open_group(&mut self) -> Frame {
		let nfa = mem::replace(&mut self.nfa, Nfa::new());
		let outer = Frame {
			nfa,
			current: self.current,
		};

		self.current = self.nfa.start();
		self.prev = None;
		outer
	}

	/// Splices the group automaton into the outer one.
	///
	/// The group is entered from the outer frontier through an epsilon
	/// transition, and each of its accepting states is connected to a
	/// single new accepting state, which becomes the frontier.
	fn close_group(&mut self, outer: Frame) {
		let group = mem::replace(&mut self.nfa, outer.nfa);
		self.current = outer.current;

		let group_start = group.start();
		let group_accepting = group.accepting_states();

		let from = self.isolated_frontier();
		let relocation = self.nfa.add_all_states(group);
		let entry = relocation.get(group_start);
		self.nfa.add_transition(from, EPSILON, entry);

		let exit = self.nfa.add_state(true);
		for q in group_accepting {
			let q = relocation.get(q);
			self.nfa.set_accepting(q, false);
			self.nfa.add_transition(q, EPSILON, exit);
		}

		self.prev = Some(entry);
		self.current = exit;
	}

	fn into_nfa(self) -> Nfa {
		self.nfa
	}
}

struct Parser<'c, C: ?Sized, I: Iterator<Item = char>, M: Metrics> {
	lexer: Lexer<I, M>,
	lookahead: Option<Loc<Token>>,
	classes: &'c C,
}

impl<'c, C: Classes + ?Sized, I: Iterator<Item = char>, M: Metrics> Parser<'c, C, I, M> {
	fn peek(&mut self) -> Result<Option<Token>> {
		if self.lookahead.is_none() {
			self.lookahead = self.lexer.next().transpose()?;
		}

		Ok(self.lookahead.as_ref().map(|token| token.as_ref().clone()))
	}

	fn consume(&mut self) -> Result<Option<Loc<Token>>> {
		match self.lookahead.take() {
			Some(token) => Ok(Some(token)),
			None => self.lexer.next().transpose(),
		}
	}

	fn expect(&mut self) -> Result<Loc<Token>> {
		match self.consume()? {
			Some(token) => Ok(token),
			None => Err(Loc::new(Error::UnexpectedEnd, self.end())),
		}
	}

	/// Empty span at the current end of input.
	fn end(&self) -> Span {
		self.lexer.position().into()
	}

	/// Span of the next token, or of the end of input.
	fn next_span(&mut self) -> Result<Span> {
		self.peek()?;
		Ok(match &self.lookahead {
			Some(token) => token.span(),
			None => self.end(),
		})
	}

	fn peek_punct(&mut self, p: char) -> Result<bool> {
		Ok(match self.peek()? {
			Some(token) => token.is_punct(p),
			None => false,
		})
	}

	fn union(&mut self, context: &mut Context) -> Result<()> {
		self.concat(context)?;

		while self.peek_punct('|')? {
			self.consume()?;
			context.union();
			self.concat(context)?;
		}

		Ok(())
	}

	fn concat(&mut self, context: &mut Context) -> Result<()> {
		let mut empty = true;

		loop {
			match self.peek()? {
				Some(Token::Punct('|')) | Some(Token::Punct(')')) | None => break,
				Some(_) => {
					self.atom(context)?;
					empty = false
				}
			}
		}

		if empty {
			let span = self.next_span()?;
			Err(Loc::new(Error::EmptyExpression, span))
		} else {
			Ok(())
		}
	}

	fn atom(&mut self, context: &mut Context) -> Result<()> {
		let token = self.expect()?;
		let span = token.span();

		match token.into_inner() {
			Token::Punct('(') => {
				let outer = context.open_group();
				self.union(context)?;
				match self.consume()? {
					Some(token) if token.is_punct(')') => (),
					_ => {
						return Err(Loc::new(
							Error::MissingCloser(Delimiter::Parenthesis),
							span,
						))
					}
				}
				context.close_group(outer)
			}
			Token::Punct('[') => {
				let set = self.bracket(span)?;
				context.concat(&set)
			}
			Token::Punct('.') => context.concat(&CharSet::printable()),
			Token::Ident(name) => {
				let set = self.class(&name, span)?;
				context.concat(&set)
			}
			Token::In => {
				context.concat(&CharSet::from_char('I'));
				context.concat(&CharSet::from_char('N'))
			}
			Token::Char(c, escaped) => {
				let c = literal(c, escaped, span)?;
				context.concat(&CharSet::from_char(c))
			}
			Token::Punct(c) if c == '-' || c == '^' => context.concat(&CharSet::from_char(c)),
			token => return Err(Loc::new(Error::Unexpected(token), span)),
		}

		if self.peek_punct('*')? {
			self.consume()?;
			context.star()
		} else if self.peek_punct('+')? {
			self.consume()?;
			context.plus()
		}

		Ok(())
	}

	/// Characters of a named class.
	fn class(&self, name: &str, span: Span) -> Result<CharSet> {
		match self.classes.class(name) {
			Some(nfa) => {
				let set: CharSet = nfa.alphabet().into_iter().filter(|c| is_printable(*c)).collect();
				if set.is_empty() {
					Err(Loc::new(Error::EmptyCharSet, span))
				} else {
					Ok(set)
				}
			}
			None => Err(Loc::new(Error::UndefinedClass(name.to_string()), span)),
		}
	}

	/// Parses what follows an opening bracket, closing bracket included.
	fn bracket(&mut self, open: Span) -> Result<CharSet> {
		if self.peek_punct('^')? {
			self.consume()?;
			let excluded = self.chars(open)?;

			match self.consume()? {
				Some(token) if *token == Token::In => (),
				Some(token) => return Err(Loc::new(Error::MissingIn, token.span())),
				None => return Err(Loc::new(Error::MissingIn, self.end())),
			}

			let token = self.expect()?;
			let span = token.span();
			let mut set = match token.into_inner() {
				Token::Punct('[') => self.chars(span)?,
				Token::Ident(name) => self.class(&name, span)?,
				token => return Err(Loc::new(Error::Unexpected(token), span)),
			};

			set.remove_all(&excluded);
			if set.is_empty() {
				Err(Loc::new(Error::EmptyCharSet, open))
			} else {
				Ok(set)
			}
		} else {
			self.chars(open)
		}
	}

	/// Parses a list of characters and ranges, closing bracket included.
	fn chars(&mut self, open: Span) -> Result<CharSet> {
		let mut set = CharSet::new();

		loop {
			let token = match self.consume()? {
				Some(token) => token,
				None => return Err(Loc::new(Error::MissingCloser(Delimiter::Bracket), open)),
			};

			let span = token.span();
			match token.into_inner() {
				Token::Punct(']') => break,
				Token::In => {
					set.insert('I');
					set.insert('N')
				}
				token => {
					let first = class_char(token, span)?;
					if self.peek_punct('-')? {
						self.consume()?;
						let token = self.expect()?;
						let last_span = token.span();
						let last = class_char(token.into_inner(), last_span)?;

						if first > last {
							let mut range_span = span;
							range_span.append(last_span);
							return Err(Loc::new(Error::InvalidRange(first, last), range_span));
						}

						set.insert_range(first, last)
					} else {
						set.insert(first)
					}
				}
			}
		}

		if set.is_empty() {
			Err(Loc::new(Error::EmptyCharSet, open))
		} else {
			Ok(set)
		}
	}
}

/// Checks a literal character appearing outside of brackets.
fn literal(c: char, escaped: bool, span: Span) -> Result<char> {
	if escaped {
		if RE_ESCAPES.contains(&c) {
			Ok(c)
		} else {
			Err(Loc::new(Error::IllegalEscape(c), span))
		}
	} else if is_printable(c) && !RE_RESERVED.contains(&c) {
		Ok(c)
	} else {
		Err(Loc::new(Error::IllegalChar(c), span))
	}
}

/// Checks a character appearing inside brackets.
fn class_char(token: Token, span: Span) -> Result<char> {
	match token {
		Token::Char(c, true) => {
			if CLS_ESCAPES.contains(&c) {
				Ok(c)
			} else {
				Err(Loc::new(Error::IllegalEscape(c), span))
			}
		}
		Token::Char(c, false) => {
			if is_printable(c) {
				Ok(c)
			} else {
				Err(Loc::new(Error::IllegalChar(c), span))
			}
		}
		Token::Punct(c) if c != '[' && c != ']' && c != '-' => Ok(c),
		token => Err(Loc::new(Error::Unexpected(token), span)),
	}
}
