extern crate source_span;

pub mod automaton;
pub mod charset;
pub mod out;
pub mod pattern;
pub mod spec;
pub mod table;
pub mod walker;

pub use automaton::{Automaton, Dfa, Nfa, StateId, EPSILON};
pub use charset::CharSet;
pub use pattern::compile;
pub use spec::Spec;
pub use table::Table;
pub use walker::{Label, Token, Walker};
