use super::{Automaton, Deterministic, Kind, StateId, StateSet, Successors, EPSILON};
use std::collections::{BTreeMap, BTreeSet};

/// Non deterministic automata, that may have more than one target
/// per state and character, and epsilon transitions.
#[derive(Clone, Copy, Debug)]
pub enum NonDeterministic {}

impl Kind for NonDeterministic {
	type Targets = BTreeSet<StateId>;

	fn insert(transitions: &mut BTreeMap<char, BTreeSet<StateId>>, c: char, target: StateId) -> bool {
		transitions.entry(c).or_default().insert(target)
	}

	fn successors(targets: &BTreeSet<StateId>) -> Successors {
		Successors::Many(targets.iter())
	}

	fn relocate(targets: &BTreeSet<StateId>, offset: usize) -> BTreeSet<StateId> {
		targets.iter().map(|q| StateId(q.0 + offset)).collect()
	}
}

/// Non deterministic finite automaton.
pub type Nfa = Automaton<NonDeterministic>;

impl Nfa {
	/// States reachable from `q` with a single transition labelled by `c`.
	///
	/// Epsilon transitions are only followed when `c` is [`EPSILON`].
	pub fn next_states(&self, q: StateId, c: char) -> Successors {
		self.state(q).successors(c)
	}

	/// Every state reachable from the given states using only epsilon transitions,
	/// the given states included.
	pub fn epsilon_closure<I: IntoIterator<Item = StateId>>(&self, states: I) -> StateSet {
		let mut closure = StateSet::new();
		let mut stack: Vec<StateId> = states.into_iter().collect();

		while let Some(q) = stack.pop() {
			if closure.insert(q) {
				stack.extend(self.next_states(q, EPSILON))
			}
		}

		closure
	}

	/// Characters labelling a transition leaving one of the given states.
	pub fn labels<'a, I: IntoIterator<Item = &'a StateId>>(&self, states: I) -> BTreeSet<char> {
		let mut labels = BTreeSet::new();

		for q in states {
			for (c, _) in self.state(*q).transitions() {
				if c != EPSILON {
					labels.insert(c);
				}
			}
		}

		labels
	}

	/// Simulates the automaton on the whole `input`.
	pub fn accepts(&self, input: &str) -> bool {
		let mut current = self.epsilon_closure(std::iter::once(self.start()));

		for c in input.chars() {
			let next: Vec<StateId> = current
				.iter()
				.flat_map(|q| self.next_states(*q, c))
				.collect();

			if next.is_empty() {
				return false;
			}

			current = self.epsilon_closure(next);
		}

		current.iter().any(|q| self.is_accepting(*q))
	}
}

impl<'a> From<&'a Automaton<Deterministic>> for Nfa {
	fn from(dfa: &'a Automaton<Deterministic>) -> Nfa {
		let mut nfa = Nfa::new();
		nfa.identifier = dfa.identifier.clone();
		nfa.char_class = dfa.char_class;

		for _ in 1..dfa.len() {
			nfa.add_state(false);
		}

		for (q, state) in dfa.states() {
			nfa.set_accepting(q, state.is_accepting());
			for (c, targets) in state.transitions() {
				for target in targets {
					nfa.add_transition(q, c, target);
				}
			}
		}

		nfa
	}
}
