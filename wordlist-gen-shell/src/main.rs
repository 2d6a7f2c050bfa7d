use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use env_logger::Env;
use log::debug;
use wordlist_gen_core::io::{normalize_folder, DEFAULT_OUTPUT_DIR};
use wordlist_gen_core::{DEFAULT_COUNT, DEFAULT_MAX_ENTRIES};

use crate::command::Command;
use crate::session::{Flow, Session, HELP};

mod command;
mod session;

/// Interactive password wordlist generator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Directory the lists are written to
	#[arg(long, env = "WORDLIST_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
	output_dir: String,

	/// Number of entries of a random list
	#[arg(long, default_value_t = DEFAULT_COUNT)]
	count: usize,

	/// Largest list the shell generates
	#[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
	max_entries: usize,

	/// Seed for reproducible lists
	#[arg(long)]
	seed: Option<u64>,

	/// Do not print the banner
	#[arg(long, short)]
	quiet: bool,
}

/// Last line printed, whether the shell ends on `exit`, end of input or Ctrl-C.
fn farewell<W: Write>(out: &mut W) -> io::Result<()> {
	writeln!(out)?;
	writeln!(out, "Bye")?;
	out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
	let args = Args::parse();

	// Exits at once; an unfinished list only exists as a temporary file.
	ctrlc::set_handler(|| {
		let _ = farewell(&mut io::stdout());
		process::exit(0);
	})?;

	let mut session = Session::new(normalize_folder(&args.output_dir))
		.with_count(args.count)
		.with_max_entries(args.max_entries)
		.with_seed(args.seed);

	let stdin = io::stdin();
	let mut stdout = io::stdout();

	if !args.quiet {
		writeln!(stdout, "Password List Generator")?;
		writeln!(stdout, "=======================")?;
		writeln!(stdout, "{HELP}\n")?;
	}

	let mut line = String::new();
	loop {
		write!(stdout, "> ")?;
		stdout.flush()?;

		line.clear();
		// Ctrl-D
		if stdin.lock().read_line(&mut line)? == 0 {
			break;
		}
		if line.trim().is_empty() {
			continue;
		}

		let result = line
			.parse::<Command>()
			.and_then(|command| session.execute(command, &mut stdout));
		match result {
			Ok(Flow::Exit) => break,
			Ok(Flow::Continue) => {}
			Err(e) => {
				debug!("command '{}' failed: {e:?}", line.trim());
				writeln!(stdout, "Error: {e}")?;
			}
		}
	}

	farewell(&mut stdout)?;
	Ok(())
}
