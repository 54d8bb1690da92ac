use super::Identifiers;
use crate::automaton::{Dfa, Nfa, StateId, StateSet};
use std::collections::{BTreeSet, HashMap};

/// Subset construction.
///
/// Each state of the returned automaton stands for a set of states of `nfa`
/// closed under epsilon transitions.
/// A deterministic state is accepting when its subset contains an accepting
/// state. The identifiers are rewritten so that each name maps to the
/// deterministic states whose subset contains one of its accepting states.
pub fn determinize(nfa: &Nfa, identifiers: &mut Identifiers) -> Dfa {
	let mut dfa = Dfa::new();
	if let Some(id) = nfa.identifier() {
		dfa.set_identifier(id)
	}
	dfa.set_char_class(nfa.is_char_class());

	let initial = nfa.epsilon_closure(std::iter::once(nfa.start()));

	let mut map: HashMap<StateSet, StateId> = HashMap::new();
	map.insert(initial.clone(), dfa.start());

	let mut subsets = vec![(dfa.start(), initial.clone())];
	let mut stack = vec![(dfa.start(), initial)];

	while let Some((source, subset)) = stack.pop() {
		for c in nfa.labels(subset.iter()) {
			let next = nfa.epsilon_closure(subset.iter().flat_map(|q| nfa.next_states(*q, c)));

			let target = match map.get(&next) {
				Some(q) => *q,
				None => {
					let q = dfa.add_state(false);
					map.insert(next.clone(), q);
					subsets.push((q, next.clone()));
					stack.push((q, next));
					q
				}
			};

			dfa.add_transition(source, c, target);
		}
	}

	log::debug!(
		"determinized {} states into {} states",
		nfa.len(),
		dfa.len()
	);

	for (q, subset) in &subsets {
		if subset.iter().any(|s| nfa.is_accepting(*s)) {
			dfa.set_accepting(*q, true)
		}
	}

	for (id, states) in identifiers.iter_mut() {
		let accepting: BTreeSet<StateId> = subsets
			.iter()
			.filter(|(_, subset)| states.iter().any(|q| subset.contains(q)))
			.map(|(q, _)| *q)
			.collect();

		log::trace!("`{}` is accepted by {} states", id, accepting.len());
		*states = accepting
	}

	dfa
}
