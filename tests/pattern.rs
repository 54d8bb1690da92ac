use rex::{
	compile,
	pattern::{compile_at, lexer::Token, Error},
	Nfa,
};
use source_span::{Position, DEFAULT_METRICS};

fn class(name: &str, regex: &str) -> Nfa {
	let known: Vec<Nfa> = Vec::new();
	let mut nfa = compile(regex, &known).unwrap();
	nfa.set_identifier(name);
	nfa.set_char_class(true);
	nfa
}

fn check(regex: &str, accepted: &[&str], rejected: &[&str]) {
	let classes = vec![class("DIGIT", "[0-9]"), class("LOWER", "[a-z]")];
	let nfa = compile(regex, &classes).unwrap();

	for input in accepted {
		assert!(nfa.accepts(input), "`{}` should accept {:?}", regex, input)
	}

	for input in rejected {
		assert!(!nfa.accepts(input), "`{}` should reject {:?}", regex, input)
	}
}

fn error(regex: &str) -> Error {
	let classes = vec![class("DIGIT", "[0-9]")];
	compile(regex, &classes).unwrap_err().into_inner()
}

#[test]
fn literals() {
	check("abc", &["abc"], &["", "ab", "abcd", "abd"]);
	check("a b c", &["abc"], &["a b c"]);
	check("a\\ b", &["a b"], &["ab"]);
	check("\\(\\)\\*\\+\\?\\$\\|\\.\\'\\\"\\\\", &["()*+?$|.'\"\\"], &[]);
}

#[test]
fn union() {
	check("a|bc|d", &["a", "bc", "d"], &["", "b", "ad", "abc"]);
}

#[test]
fn star_and_plus() {
	check("ab*", &["a", "ab", "abbbb"], &["", "b", "aba"]);
	check("ab+", &["ab", "abbbb"], &["a", "aab"]);
	check("a*", &["", "a", "aaa"], &["b"]);
}

#[test]
fn loops_are_isolated() {
	check("a*b*", &["", "a", "b", "aab", "abbb"], &["ba", "aba"]);
	check("a*|b", &["", "a", "aa", "b"], &["ab", "bb", "ba"]);
	check("a+b+", &["ab", "aabb"], &["a", "b", "aba", "abab"]);
	check("ab*c", &["ac", "abc", "abbc"], &["acb", "abcb"]);
}

#[test]
fn groups() {
	check("(ab)*", &["", "ab", "abab"], &["a", "aba", "ba"]);
	check("(a|b)+c", &["ac", "bc", "abbac"], &["c", "ab"]);
	check("x(ab|c)y", &["xaby", "xcy"], &["xy", "xabcy"]);
	check("((a))", &["a"], &["", "aa"]);
	check("(a*)(b*)", &["", "a", "b", "ab"], &["ba"]);
}

#[test]
fn wildcard() {
	check(".", &["a", " ", "~", "."], &["", "ab", "\t"]);
	check("a.c", &["abc", "a c"], &["ac"]);
}

#[test]
fn character_classes() {
	check("[abc]", &["a", "b", "c"], &["d", "ab", ""]);
	check("[a-cx]+", &["a", "cab", "xx"], &["d", "y"]);
	check("[\\ \\-\\^\\[\\]\\\\]", &[" ", "-", "^", "[", "]", "\\"], &["a"]);
	check("[()*+|.]", &["(", ")", "*", "+", "|", "."], &["a"]);
	check("[IN]", &["I", "N"], &["IN"]);
}

#[test]
fn exclusion() {
	let mut accepted = Vec::new();
	let mut rejected = Vec::new();
	for c in (b' '..=b'~').map(|b| b as char) {
		let s = c.to_string();
		if c >= 'd' && c <= 'z' {
			accepted.push(s)
		} else {
			rejected.push(s)
		}
	}

	let accepted: Vec<&str> = accepted.iter().map(|s| s.as_str()).collect();
	let rejected: Vec<&str> = rejected.iter().map(|s| s.as_str()).collect();
	check("[^a-c] IN [a-z]", &accepted, &rejected);
	check("[^a-c] IN $LOWER", &accepted, &rejected);
}

#[test]
fn class_references() {
	check("$DIGIT+", &["0", "42", "1234567890"], &["", "a", "4a"]);
	check("$LOWER($LOWER|$DIGIT)*", &["a", "a1b2"], &["1a"]);
	check("[^0] IN $DIGIT $DIGIT*", &["1", "10", "907"], &["0", "01"]);
}

#[test]
fn literal_meta_symbols() {
	check("a-b", &["a-b"], &["b"]);
	check("^x", &["^x"], &["x"]);
	check("IN", &["IN"], &["I"]);
	check("a %% comment", &["a"], &["a %% comment"]);
}

#[test]
fn syntax_errors() {
	match error("(ab") {
		Error::MissingCloser(_) => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[ab") {
		Error::MissingCloser(_) => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("ab)") {
		Error::Unexpected(Token::Punct(')')) => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("*a") {
		Error::Unexpected(Token::Punct('*')) => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("a\\") {
		Error::IncompleteEscape => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[^a] [a-z]") {
		Error::MissingIn => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("a$") {
		Error::MissingClassName => (),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn illegal_characters() {
	match error("a?") {
		Error::IllegalChar('?') => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("'a'") {
		Error::IllegalChar('\'') => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("\\a") {
		Error::IllegalEscape('a') => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[\\.]") {
		Error::IllegalEscape('.') => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("é") {
		Error::IllegalChar('é') => (),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn semantic_errors() {
	match error("$LETTER") {
		Error::UndefinedClass(name) => assert_eq!(name, "LETTER"),
		e => panic!("unexpected error: {}", e),
	}

	match error("") {
		Error::EmptyExpression => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("a|") {
		Error::EmptyExpression => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("()") {
		Error::EmptyExpression => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[]") {
		Error::EmptyCharSet => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[^0-9] IN $DIGIT") {
		Error::EmptyCharSet => (),
		e => panic!("unexpected error: {}", e),
	}

	match error("[z-a]") {
		Error::InvalidRange('z', 'a') => (),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn error_positions() {
	let classes: Vec<Nfa> = Vec::new();
	let e = compile_at("ab $NOPE", Position::new(3, 10), DEFAULT_METRICS, &classes).unwrap_err();

	let span = e.span();
	assert_eq!(span.start(), Position::new(3, 13));
	assert_eq!(span.end(), Position::new(3, 18));
	assert_eq!(e.as_ref().to_string(), "undefined class `$NOPE`");
}
