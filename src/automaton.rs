//! Finite automata over characters.
//!
//! Both the non deterministic automata produced by the pattern compiler and
//! the deterministic automata produced by the subset construction share the
//! same arena representation: a vector of states indexed by [`StateId`],
//! where the state at index `0` is always the start state.
//! They only differ by the [`Kind`] of transition targets they store.
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

mod dfa;
mod dot;
mod nfa;

pub use dfa::*;
pub use nfa::*;

/// Pseudo-character labelling epsilon transitions.
pub const EPSILON: char = '\0';

/// Ordered set of states, used to identify subsets during determinization.
pub type StateSet = btree_slab::BTreeSet<StateId>;

/// Index of a state in its automaton.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct StateId(usize);

impl StateId {
	pub fn index(&self) -> usize {
		self.0
	}
}

impl fmt::Display for StateId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "q{}", self.0)
	}
}

/// Kind of automaton.
pub trait Kind {
	/// Targets of the transitions of a state on a given character.
	type Targets: Clone + PartialEq + fmt::Debug;

	/// Adds a transition to `target` in the given transition map.
	///
	/// Returns `false` if the transition could not be added because
	/// it already exists or would break determinism.
	fn insert(transitions: &mut BTreeMap<char, Self::Targets>, c: char, target: StateId) -> bool;

	fn successors(targets: &Self::Targets) -> Successors;

	fn relocate(targets: &Self::Targets, offset: usize) -> Self::Targets;
}

/// Iterator over the targets of some transition.
pub enum Successors<'a> {
	None,
	One(Option<StateId>),
	Many(std::collections::btree_set::Iter<'a, StateId>),
}

impl<'a> Iterator for Successors<'a> {
	type Item = StateId;

	fn next(&mut self) -> Option<StateId> {
		match self {
			Successors::None => None,
			Successors::One(q) => q.take(),
			Successors::Many(inner) => inner.next().cloned(),
		}
	}
}

/// Automaton state.
#[derive(Debug)]
pub struct State<K: Kind> {
	accepting: bool,
	transitions: BTreeMap<char, K::Targets>,
}

impl<K: Kind> State<K> {
	fn new(accepting: bool) -> Self {
		State {
			accepting,
			transitions: BTreeMap::new(),
		}
	}

	pub fn is_accepting(&self) -> bool {
		self.accepting
	}

	/// Checks if the state has at least one outgoing transition, epsilon included.
	pub fn has_transitions(&self) -> bool {
		!self.transitions.is_empty()
	}

	/// Outgoing transitions, ordered by label.
	pub fn transitions(&self) -> impl Iterator<Item = (char, Successors)> + '_ {
		self.transitions
			.iter()
			.map(|(c, targets)| (*c, K::successors(targets)))
	}

	pub fn successors(&self, c: char) -> Successors {
		match self.transitions.get(&c) {
			Some(targets) => K::successors(targets),
			None => Successors::None,
		}
	}
}

impl<K: Kind> Clone for State<K> {
	fn clone(&self) -> Self {
		State {
			accepting: self.accepting,
			transitions: self.transitions.clone(),
		}
	}
}

/// Maps the states of an automaton imported with
/// [`Automaton::add_all_states`] to their new identifiers.
#[derive(Clone, Copy, Debug)]
pub struct Relocation(usize);

impl Relocation {
	pub fn get(&self, q: StateId) -> StateId {
		StateId(q.0 + self.0)
	}
}

/// Finite automaton.
#[derive(Debug)]
pub struct Automaton<K: Kind> {
	/// Name of the pattern this automaton recognizes, if any.
	identifier: Option<String>,

	/// Is this automaton a character class (only used to define other patterns)?
	char_class: bool,

	/// States. The first one is the start state.
	states: Vec<State<K>>,
}

impl<K: Kind> Automaton<K> {
	/// Creates a new automaton with a single, non accepting, start state.
	pub fn new() -> Self {
		Automaton {
			identifier: None,
			char_class: false,
			states: vec![State::new(false)],
		}
	}

	pub fn named<S: Into<String>>(identifier: S, char_class: bool) -> Self {
		let mut automaton = Self::new();
		automaton.identifier = Some(identifier.into());
		automaton.char_class = char_class;
		automaton
	}

	pub fn identifier(&self) -> Option<&str> {
		self.identifier.as_deref()
	}

	pub fn set_identifier<S: Into<String>>(&mut self, identifier: S) {
		self.identifier = Some(identifier.into())
	}

	pub fn is_char_class(&self) -> bool {
		self.char_class
	}

	pub fn set_char_class(&mut self, char_class: bool) {
		self.char_class = char_class
	}

	pub fn start(&self) -> StateId {
		StateId(0)
	}

	/// Number of states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn contains(&self, q: StateId) -> bool {
		q.0 < self.states.len()
	}

	/// Returns the given state.
	///
	/// Panics if `q` is not a state of this automaton.
	pub fn state(&self, q: StateId) -> &State<K> {
		&self.states[q.0]
	}

	/// States in allocation order.
	pub fn states(&self) -> impl Iterator<Item = (StateId, &State<K>)> {
		self.states
			.iter()
			.enumerate()
			.map(|(i, state)| (StateId(i), state))
	}

	pub fn add_state(&mut self, accepting: bool) -> StateId {
		let q = StateId(self.states.len());
		self.states.push(State::new(accepting));
		q
	}

	/// Imports every state of `other` into this automaton.
	///
	/// Transitions and accepting flags are preserved.
	/// The returned relocation gives the new identifier of each imported state.
	pub fn add_all_states(&mut self, other: Automaton<K>) -> Relocation {
		let offset = self.states.len();
		self.states.extend(other.states.into_iter().map(|state| State {
			accepting: state.accepting,
			transitions: state
				.transitions
				.iter()
				.map(|(c, targets)| (*c, K::relocate(targets, offset)))
				.collect(),
		}));
		Relocation(offset)
	}

	/// Adds a transition from `source` to `target` labelled by `c`.
	///
	/// Returns `false` if nothing was added.
	pub fn add_transition(&mut self, source: StateId, c: char, target: StateId) -> bool {
		debug_assert!(self.contains(target));
		K::insert(&mut self.states[source.0].transitions, c, target)
	}

	pub fn is_accepting(&self, q: StateId) -> bool {
		self.states[q.0].accepting
	}

	pub fn set_accepting(&mut self, q: StateId, accepting: bool) {
		self.states[q.0].accepting = accepting
	}

	pub fn accepting_states(&self) -> BTreeSet<StateId> {
		self.states()
			.filter(|(_, state)| state.accepting)
			.map(|(q, _)| q)
			.collect()
	}

	/// Set of non epsilon characters labelling at least one transition.
	pub fn alphabet(&self) -> BTreeSet<char> {
		self.states
			.iter()
			.flat_map(|state| state.transitions.keys().cloned())
			.filter(|c| *c != EPSILON)
			.collect()
	}
}

impl<K: Kind> Default for Automaton<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Kind> Clone for Automaton<K> {
	fn clone(&self) -> Self {
		Automaton {
			identifier: self.identifier.clone(),
			char_class: self.char_class,
			states: self.states.clone(),
		}
	}
}
