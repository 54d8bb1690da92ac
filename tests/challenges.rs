#[macro_use]
extern crate lazy_static;

use rex::{Spec, Table, Walker};
use std::{collections::HashMap, fmt, fs, io};

/// A specification and the inputs to scan with it.
struct Challenge {
	spec: String,
	cases: Vec<Case>,
}

struct Case {
	input: String,
	tokens: Vec<(String, String)>,
}

fn string<I: toml::value::Index + Copy + fmt::Debug>(value: &toml::Value, key: I) -> String {
	match value.get(key).and_then(toml::Value::as_str) {
		Some(s) => s.to_string(),
		None => panic!("missing string {:?}", key),
	}
}

fn load(name: &str) -> Challenge {
	let path = format!("tests/challenges/{}.toml", name);
	let content = fs::read_to_string(&path).unwrap();
	let value: toml::Value = content.parse().unwrap();

	let cases = match value.get("case").and_then(toml::Value::as_array) {
		Some(cases) => cases
			.iter()
			.map(|case| {
				let tokens = case["tokens"]
					.as_array()
					.unwrap()
					.iter()
					.map(|pair| (string(pair, 0), string(pair, 1)))
					.collect();

				Case {
					input: string(case, "input"),
					tokens,
				}
			})
			.collect(),
		None => panic!("{}: no cases", path),
	};

	Challenge {
		spec: string(&value, "spec"),
		cases,
	}
}

lazy_static! {
	static ref CHALLENGES: HashMap<&'static str, Challenge> = ["laws", "classes", "keywords"]
		.iter()
		.map(|name| (*name, load(name)))
		.collect();
}

fn run(name: &str) -> io::Result<()> {
	let challenge = &CHALLENGES[name];
	let spec = match Spec::parse(&challenge.spec) {
		Ok(spec) => spec,
		Err(e) => panic!("{}: line {}: {}", name, e.span().start().line + 1, e.as_ref()),
	};
	let table = Table::new(&spec);

	for case in &challenge.cases {
		let mut tokens = Vec::new();
		for token in Walker::new(&table, case.input.as_bytes()) {
			let (label, lexeme) = token?.into_parts();
			tokens.push((label.to_string(), lexeme))
		}

		assert_eq!(tokens, case.tokens, "{}: {:?}", name, case.input)
	}

	Ok(())
}

#[test]
fn laws() -> io::Result<()> {
	run("laws")
}

#[test]
fn classes() -> io::Result<()> {
	run("classes")
}

#[test]
fn keywords() -> io::Result<()> {
	run("keywords")
}
