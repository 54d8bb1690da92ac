use super::Identifiers;
use crate::automaton::{Nfa, EPSILON};

/// Combines named automata into a single one.
///
/// The start state of the result is connected to the start state of each
/// automaton with an epsilon transition. The returned identifiers map each
/// name to the (relocated) accepting states of its automaton, in the order
/// the automata are given.
pub fn combine<'a, I: IntoIterator<Item = &'a Nfa>>(automata: I) -> (Nfa, Identifiers) {
	let mut combined = Nfa::named("<COMBINED>", false);
	let mut identifiers = Identifiers::new();
	let start = combined.start();

	for nfa in automata {
		match nfa.identifier() {
			Some(id) => {
				let relocation = combined.add_all_states(nfa.clone());
				combined.add_transition(start, EPSILON, relocation.get(nfa.start()));
				identifiers.insert(
					id,
					nfa.accepting_states()
						.into_iter()
						.map(|q| relocation.get(q)),
				);
			}
			None => log::warn!("skipping unnamed automaton"),
		}
	}

	(combined, identifiers)
}
