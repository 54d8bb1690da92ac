use super::{Automaton, Kind, StateId, Successors};
use std::collections::{btree_map::Entry, BTreeMap};

/// Deterministic automata, with at most one target per state and character.
#[derive(Clone, Copy, Debug)]
pub enum Deterministic {}

impl Kind for Deterministic {
	type Targets = StateId;

	fn insert(transitions: &mut BTreeMap<char, StateId>, c: char, target: StateId) -> bool {
		match transitions.entry(c) {
			Entry::Vacant(entry) => {
				entry.insert(target);
				true
			}
			Entry::Occupied(_) => false,
		}
	}

	fn successors(target: &StateId) -> Successors {
		Successors::One(Some(*target))
	}

	fn relocate(target: &StateId, offset: usize) -> StateId {
		StateId(target.0 + offset)
	}
}

/// Deterministic finite automaton.
pub type Dfa = Automaton<Deterministic>;

impl Dfa {
	/// The state reached from `q` with the character `c`, if any.
	pub fn next_state(&self, q: StateId, c: char) -> Option<StateId> {
		self.state(q).successors(c).next()
	}

	/// Follows the transitions labelled by `input`, from the start state.
	///
	/// Returns the reached state, or `None` if the automaton gets stuck.
	pub fn run(&self, input: &str) -> Option<StateId> {
		let mut q = self.start();

		for c in input.chars() {
			q = self.next_state(q, c)?;
		}

		Some(q)
	}

	pub fn accepts(&self, input: &str) -> bool {
		match self.run(input) {
			Some(q) => self.is_accepting(q),
			None => false,
		}
	}
}
