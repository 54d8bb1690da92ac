use btree_range_map::RangeSet;
use std::{fmt, iter::FromIterator};

/// Smallest printable ASCII character (space).
pub const ASCII_MIN: char = '\x20';

/// Largest printable ASCII character (`~`).
pub const ASCII_MAX: char = '\x7e';

pub fn is_printable(c: char) -> bool {
	c >= ASCII_MIN && c <= ASCII_MAX
}

/// Displays a character the way it must be written inside brackets.
pub struct DisplayChar(pub char);

impl fmt::Display for DisplayChar {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let c = self.0;
		match c {
			'\\' | '^' | '-' | '[' | ']' => write!(f, "\\{}", c),
			' ' => write!(f, "\\ "),
			'"' => write!(f, "\\\""),
			_ => c.fmt(f),
		}
	}
}

/// Set of printable ASCII characters.
///
/// Every class of the pattern language (`.`, `[...]`, exclusions and
/// references to named classes) is expanded into one of these before it
/// labels any transition.
#[derive(Clone)]
pub struct CharSet(RangeSet<char>);

impl CharSet {
	pub fn new() -> CharSet {
		CharSet(RangeSet::new())
	}

	/// The wildcard set: every printable ASCII character.
	pub fn printable() -> CharSet {
		let mut set = CharSet::new();
		set.insert_range(ASCII_MIN, ASCII_MAX);
		set
	}

	pub fn from_char(c: char) -> CharSet {
		let mut set = CharSet::new();
		set.insert(c);
		set
	}

	pub fn insert(&mut self, c: char) {
		debug_assert!(is_printable(c));
		self.0.insert(c..=c)
	}

	/// Inserts every character between `first` and `last`, both included.
	pub fn insert_range(&mut self, first: char, last: char) {
		debug_assert!(is_printable(first) && is_printable(last));
		if first <= last {
			self.0.insert(first..=last)
		}
	}

	/// Removes every character of `other` from this set.
	pub fn remove_all(&mut self, other: &CharSet) {
		for c in other.chars() {
			self.0.remove(c..=c)
		}
	}

	pub fn contains(&self, c: char) -> bool {
		is_printable(c) && self.0.contains(c)
	}

	/// Iterates over the characters of the set, in ASCII order.
	pub fn chars(&self) -> Chars {
		Chars {
			set: self,
			next: ASCII_MIN as u8,
		}
	}

	pub fn len(&self) -> usize {
		self.chars().count()
	}

	pub fn is_empty(&self) -> bool {
		self.chars().next().is_none()
	}

	/// Maximal runs of consecutive characters of the set.
	pub fn ranges(&self) -> Vec<(char, char)> {
		let mut ranges: Vec<(char, char)> = Vec::new();

		for c in self.chars() {
			match ranges.last_mut() {
				Some((_, last)) if *last as u32 + 1 == c as u32 => *last = c,
				_ => ranges.push((c, c)),
			}
		}

		ranges
	}
}

impl Default for CharSet {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for CharSet {
	fn eq(&self, other: &Self) -> bool {
		self.chars().eq(other.chars())
	}
}

impl Eq for CharSet {}

impl FromIterator<char> for CharSet {
	fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
		let mut set = CharSet::new();
		for c in iter {
			set.insert(c)
		}
		set
	}
}

impl fmt::Display for CharSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let ranges = self.ranges();
		if let [(first, last)] = ranges.as_slice() {
			if first == last {
				return DisplayChar(*first).fmt(f);
			}
		}

		write!(f, "[")?;
		for (first, last) in ranges {
			if first == last {
				DisplayChar(first).fmt(f)?
			} else if first as u32 + 1 == last as u32 {
				write!(f, "{}{}", DisplayChar(first), DisplayChar(last))?
			} else {
				write!(f, "{}-{}", DisplayChar(first), DisplayChar(last))?
			}
		}
		write!(f, "]")
	}
}

impl fmt::Debug for CharSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

pub struct Chars<'a> {
	set: &'a CharSet,
	next: u8,
}

impl<'a> Iterator for Chars<'a> {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		while self.next <= ASCII_MAX as u8 {
			let c = self.next as char;
			self.next += 1;
			if self.set.0.contains(c) {
				return Some(c);
			}
		}

		None
	}
}
