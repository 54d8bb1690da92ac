use crate::automaton::StateId;
use std::collections::BTreeSet;

/// Maps each pattern identifier to the states recognizing it.
///
/// Entries are kept in declaration order, which decides which identifier
/// labels a state recognizing more than one pattern: the first one wins.
#[derive(Clone, Default, Debug)]
pub struct Identifiers {
	entries: Vec<(String, BTreeSet<StateId>)>,
}

impl Identifiers {
	pub fn new() -> Identifiers {
		Identifiers {
			entries: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Adds states to the given identifier.
	///
	/// A new identifier is placed after every existing one.
	pub fn insert<S: AsRef<str>, I: IntoIterator<Item = StateId>>(&mut self, id: S, states: I) {
		let id = id.as_ref();
		match self.entries.iter_mut().find(|(name, _)| name == id) {
			Some((_, set)) => set.extend(states),
			None => self.entries.push((id.to_string(), states.into_iter().collect())),
		}
	}

	pub fn get(&self, id: &str) -> Option<&BTreeSet<StateId>> {
		self.entries
			.iter()
			.find(|(name, _)| name == id)
			.map(|(_, states)| states)
	}

	/// Identifiers in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<StateId>)> {
		self.entries.iter().map(|(name, states)| (name.as_str(), states))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut BTreeSet<StateId>)> {
		self.entries
			.iter_mut()
			.map(|(name, states)| (name.as_str(), states))
	}

	/// The first declared identifier recognized by the given state.
	pub fn identify(&self, q: StateId) -> Option<&str> {
		self.entries
			.iter()
			.find(|(_, states)| states.contains(&q))
			.map(|(name, _)| name.as_str())
	}
}
