use rex::{
	spec::{self, Error},
	Spec, Table, Walker,
};
use source_span::{Position, SourceBuffer};
use std::{
	fs::File,
	io::{self, BufReader, Read},
};
use utf8_decode::UnsafeDecoder;

fn load(filename: &str) -> io::Result<Spec> {
	let file = File::open(filename)?;
	let input = BufReader::new(file);
	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let utf8_input = UnsafeDecoder::new(input.bytes());
	let buffer = SourceBuffer::new(utf8_input, Position::default(), metrics);
	let content = buffer.iter().collect::<io::Result<String>>()?;

	match Spec::parse_with(&content, metrics) {
		Ok(spec) => Ok(spec),
		Err(e) => panic!("{}:{}: {}", filename, e.span().start().line + 1, e.as_ref()),
	}
}

fn names<'a, I: Iterator<Item = &'a rex::Nfa>>(automata: I) -> Vec<&'a str> {
	automata.filter_map(|nfa| nfa.identifier()).collect()
}

fn parse_error(input: &str) -> source_span::Loc<Error> {
	match Spec::parse(input) {
		Ok(_) => panic!("{:?} should not parse", input),
		Err(e) => e,
	}
}

#[test]
fn numbers() -> io::Result<()> {
	let spec = load("tests/numbers.rex")?;

	assert_eq!(
		names(spec.character_classes()),
		vec!["DIGIT", "NON-ZERO", "LETTER", "ALNUM"]
	);
	assert_eq!(
		names(spec.token_classes()),
		vec!["IF", "INT", "FLOAT", "ID", "OP", "STRING"]
	);
	assert_eq!(spec.len(), 10);

	let table = Table::new(&spec);
	let input = "if x1 = 42 + 3.14 \"hi there\" 007 \"open";
	let mut tokens = Vec::new();
	for token in Walker::new(&table, input.as_bytes()) {
		let token = token?;
		tokens.push(format!("{}", token))
	}

	assert_eq!(
		tokens,
		vec![
			"IF\tif",
			"ID\tx1",
			"OP\t=",
			"INT\t42",
			"OP\t+",
			"FLOAT\t3.14",
			"STRING\t\"hi there\"",
			"INT\t0",
			"INT\t0",
			"INT\t7",
			"<INVALID>\t\"open",
			"<EOF>\t"
		]
	);

	Ok(())
}

#[test]
fn sections() {
	let spec = Spec::parse("\n\n$A a\n   \n$B b\n\n$C c\n").unwrap();
	assert_eq!(names(spec.character_classes()), vec!["A"]);
	assert_eq!(names(spec.token_classes()), vec!["B", "C"]);

	let spec = Spec::parse("%% only comments\n%%\n$A a\n%% still classes\n$B b").unwrap();
	assert_eq!(names(spec.character_classes()), vec!["A", "B"]);
	assert!(spec.token_classes().next().is_none());
}

#[test]
fn references_resolve_against_earlier_definitions() {
	let spec = Spec::parse("$D [0-9]\n\n$N $D+\n$P $N+\\.$N+").unwrap();
	let p = spec.definition("P").unwrap();
	assert!(p.accepts("12.5"));
	assert!(!p.accepts("12."));

	let e = parse_error("$N $D+\n$D [0-9]");
	match e.as_ref() {
		Error::Pattern(rex::pattern::Error::UndefinedClass(name)) => assert_eq!(name, "D"),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn duplicate_identifiers() {
	let e = parse_error("$A a\n$A b");
	assert_eq!(e.span().start(), Position::new(1, 0));

	match e.as_ref() {
		Error::AlreadyDefined(name, first) => {
			assert_eq!(name, "A");
			assert_eq!(first.start(), Position::new(0, 0));
		}
		e => panic!("unexpected error: {}", e),
	}

	let mut spec = Spec::new();
	spec.define("X", "x", false).unwrap();
	assert!(spec.define("X", "y", false).is_err());
	assert_eq!(spec.len(), 1);
}

#[test]
fn syntax_errors() {
	let e = parse_error("$A a\nA b");
	assert_eq!(e.span().start(), Position::new(1, 0));
	assert_eq!(e.as_ref().to_string(), "lines must begin with an identifier");

	match parse_error("$ a").into_inner() {
		Error::MissingIdentifier => (),
		e => panic!("unexpected error: {}", e),
	}

	let e = parse_error("  $B [a");
	assert_eq!(e.span().start(), Position::new(0, 5));
	match e.as_ref() {
		Error::Pattern(rex::pattern::Error::MissingCloser(_)) => (),
		e => panic!("unexpected error: {}", e),
	}

	let mut spec = Spec::new();
	match spec.define("A B", "a", false).unwrap_err().into_inner() {
		Error::InvalidIdentifier(name) => assert_eq!(name, "A B"),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn help_messages() {
	let e = parse_error("$Q a?");
	assert_eq!(e.as_ref().to_string(), "illegal character `?`");
	assert_eq!(
		e.help().as_deref(),
		Some("escape it with a backslash: `\\?`")
	);

	let e: spec::Error = parse_error("$R [z-a]").into_inner();
	assert!(e.help().is_some());
}
