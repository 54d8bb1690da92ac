//! Lexing tables.
use crate::{
	automaton::{Dfa, Nfa, StateId},
	spec::Spec,
};

mod combine;
mod determinize;
mod identifiers;

pub use combine::*;
pub use determinize::*;
pub use identifiers::*;

/// Deterministic lexing table.
///
/// A deterministic automaton recognizing every token class,
/// and the identifier of the token class recognized by each accepting state.
#[derive(Clone, Debug)]
pub struct Table {
	dfa: Dfa,
	identifiers: Identifiers,
}

impl Table {
	/// Builds the lexing table of the token classes of the given specification.
	pub fn new(spec: &Spec) -> Table {
		Self::from_patterns(spec.token_classes())
	}

	/// Builds the lexing table recognizing the given named patterns.
	///
	/// When some input is recognized by more than one pattern,
	/// the first one wins.
	pub fn from_patterns<'a, I: IntoIterator<Item = &'a Nfa>>(patterns: I) -> Table {
		let (nfa, mut identifiers) = combine(patterns);
		log::info!(
			"combined {} patterns into {} states",
			identifiers.len(),
			nfa.len()
		);

		let dfa = determinize(&nfa, &mut identifiers);
		log::info!("lexing table has {} states", dfa.len());

		Table { dfa, identifiers }
	}

	pub fn dfa(&self) -> &Dfa {
		&self.dfa
	}

	pub fn identifiers(&self) -> &Identifiers {
		&self.identifiers
	}

	/// Identifier of the pattern recognized by the given state, if any.
	pub fn label(&self, q: StateId) -> Option<&str> {
		self.identifiers.identify(q)
	}

	/// Length of the longest identifier.
	pub fn label_width(&self) -> usize {
		self.identifiers.names().map(|name| name.len()).max().unwrap_or(0)
	}

	pub fn into_parts(self) -> (Dfa, Identifiers) {
		(self.dfa, self.identifiers)
	}
}
