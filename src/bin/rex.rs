#[macro_use]
extern crate clap;

use itertools::Itertools;
use source_span::{DefaultMetrics, Position, SourceBuffer};
use std::{
	fs::File,
	io::{self, BufReader, Read, Write},
	process,
};
use utf8_decode::UnsafeDecoder;

use rex::{out, table, walker, Nfa, Spec, Table, Walker};

fn main() -> io::Result<()> {
	// Parse options.
	let yaml = load_yaml!("rex.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();

	// Init logger.
	let verbosity = matches.occurrences_of("verbose") as usize;
	stderrlog::new()
		.verbosity(verbosity)
		.init()
		.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

	match matches.subcommand() {
		("scan", Some(m)) => {
			let spec = load_spec(m.value_of("SPEC").unwrap_or_default())?;
			scan(&spec, m.values_of("INPUT").into_iter().flatten())
		}
		("dot", Some(m)) => {
			let spec = load_spec(m.value_of("SPEC").unwrap_or_default())?;
			dot(&spec, m.is_present("nfa"))
		}
		(name, _) => {
			eprintln!("unknown command `{}`", name);
			process::exit(1)
		}
	}
}

/// Parses the given specification file.
///
/// Errors are rendered on the standard error output, and end the process.
fn load_spec(filename: &str) -> io::Result<Spec> {
	let file = File::open(filename)?;
	let input = BufReader::new(file);

	let metrics = DefaultMetrics::with_tab_stop(4);
	let utf8_input = UnsafeDecoder::new(input.bytes());
	let buffer = SourceBuffer::new(utf8_input, Position::default(), metrics);
	let content = buffer.iter().collect::<io::Result<String>>()?;

	log::info!("parsing specification...");
	match Spec::parse_with(&content, metrics) {
		Ok(spec) => {
			for nfa in spec.token_classes().filter(|nfa| nfa.accepts("")) {
				if let Some((id, definition)) = nfa
					.identifier()
					.and_then(|id| spec.definition(id).map(|def| (id, def)))
				{
					let mut block = out::Block::empty_token_class(id, definition.span());
					block.set_source(filename);
					let formatted = block.render(buffer.iter(), buffer.span(), &metrics)?;
					eprintln!("{}", formatted)
				}
			}

			Ok(spec)
		}
		Err(e) => {
			let mut block = out::Block::from_spec_error(&e);
			block.set_source(filename);
			let formatted = block.render(buffer.iter(), buffer.span(), &metrics)?;
			eprintln!("{}", formatted);
			process::exit(1)
		}
	}
}

fn names<'a, I: Iterator<Item = &'a Nfa>>(automata: I) -> String {
	let names: Vec<&str> = automata.filter_map(|nfa| nfa.identifier()).collect();
	if names.is_empty() {
		"<none>".to_string()
	} else {
		names.iter().format(", ").to_string()
	}
}

fn scan<'a, I: Iterator<Item = &'a str>>(spec: &Spec, inputs: I) -> io::Result<()> {
	println!("-- Character classes: {}", names(spec.character_classes()));
	println!("-- Token classes: {}", names(spec.token_classes()));

	log::info!("building lexing table...");
	let table = Table::new(spec);
	let width = std::cmp::max(table.label_width(), walker::INVALID.len());

	let stdout = io::stdout();
	let mut output = stdout.lock();

	for filename in inputs {
		let file = match File::open(filename) {
			Ok(file) => file,
			Err(e) => {
				log::warn!("unable to open `{}`: {}", filename, e);
				writeln!(output, "Invalid file path: skipping \"{}\".", filename)?;
				continue;
			}
		};

		log::info!("scanning `{}`...", filename);
		writeln!(output, "-- {}", filename)?;
		for token in Walker::new(&table, BufReader::new(file)) {
			match token {
				Ok(token) => writeln!(
					output,
					"{:width$}\t{}",
					token.label(),
					token.lexeme(),
					width = width
				)?,
				Err(e) => {
					log::error!("unable to read `{}`: {}", filename, e);
					eprintln!("Read error: skipping the rest of \"{}\": {}", filename, e);
					break;
				}
			}
		}
	}

	Ok(())
}

fn dot(spec: &Spec, nfa: bool) -> io::Result<()> {
	let stdout = io::stdout();
	let mut output = stdout.lock();

	if nfa {
		let (nfa, _) = table::combine(spec.token_classes());
		nfa.dot_write(&mut output)?
	} else {
		Table::new(spec).dfa().dot_write(&mut output)?
	}

	writeln!(output)
}
