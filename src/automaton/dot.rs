use super::{Automaton, Kind, StateId, EPSILON};
use crate::CharSet;
use std::collections::BTreeMap;

impl<K: Kind> Automaton<K> {
	/// Writes the automaton in the graphviz DOT format.
	///
	/// Transitions between the same pair of states are merged into
	/// a single edge labelled by their character set.
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()> {
		write!(f, "digraph {{\n")?;

		if let Some(id) = self.identifier() {
			write!(f, "\tlabel=\"{}\"\n", id)?;
		}

		write!(f, "\t{} [ shape=box ]\n", self.start())?;
		for (q, state) in self.states() {
			if state.is_accepting() {
				write!(f, "\t{} [ shape=doublecircle ]\n", q)?;
			}
		}

		for (source, state) in self.states() {
			let mut edges: BTreeMap<StateId, CharSet> = BTreeMap::new();

			for (c, targets) in state.transitions() {
				for target in targets {
					if c == EPSILON {
						write!(f, "\t{} -> {} [ label=\"ε\" ]\n", source, target)?
					} else {
						edges.entry(target).or_default().insert(c)
					}
				}
			}

			for (target, label) in edges {
				write!(f, "\t{} -> {} [ label=\"{}\" ]\n", source, target, label)?
			}
		}

		write!(f, "}}")
	}
}
