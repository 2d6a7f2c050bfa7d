use std::io;
use std::str::FromStr;

use thiserror::Error;
use wordlist_gen_core::{Category, GenError};

/// A single parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	SetLength(i64),
	SetType(Category),
	SetOutput(String),
	UnsetOutput,
	/// Bounds are kept as typed; they are validated on `generate`.
	SetSequentialStart(String),
	SetSequentialEnd(String),
	SetCount(usize),
	/// `None` goes back to an OS-seeded generator.
	SetSeed(Option<u64>),
	Show,
	Categories,
	Generate,
	Save,
	Help,
	Exit,
}

/// Errors printed back to the user. None of them ends the loop.
#[derive(Debug, Error)]
pub enum CommandError {
	#[error("Unknown command '{0}'. Type 'help' for the list of commands")]
	Unknown(String),

	#[error("Unknown setting '{0}'. Type 'help' for the list of settings")]
	UnknownSetting(String),

	#[error("Missing value for '{0}'")]
	MissingValue(String),

	#[error("'{0}' is not a number")]
	NotANumber(String),

	#[error("No type set. Use 'set type <category>' ('categories' lists them)")]
	MissingType,

	#[error(transparent)]
	Generation(#[from] GenError),

	#[error("Failed to print: {0}")]
	Output(#[from] io::Error),
}

/// Splits off the first whitespace-separated word of `s`.
fn split_word(s: &str) -> (&str, &str) {
	match s.split_once(char::is_whitespace) {
		Some((word, rest)) => (word, rest.trim()),
		None => (s, ""),
	}
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, CommandError> {
	value.parse::<T>().map_err(|_| CommandError::NotANumber(value.to_owned()))
}

impl FromStr for Command {
	type Err = CommandError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let (word, rest) = split_word(line.trim());
		match word.to_lowercase().as_str() {
			"set" => {
				let (key, value) = split_word(rest);
				if key.is_empty() {
					return Err(CommandError::MissingValue("set".to_owned()));
				}
				let key = key.to_lowercase();
				if value.is_empty() {
					return Err(CommandError::MissingValue(key));
				}
				match key.as_str() {
					"length" => Ok(Command::SetLength(parse_number(value)?)),
					"type" => Ok(Command::SetType(value.parse()?)),
					"output" => Ok(Command::SetOutput(value.to_owned())),
					"sequential_start" => Ok(Command::SetSequentialStart(value.to_owned())),
					"sequential_end" => Ok(Command::SetSequentialEnd(value.to_owned())),
					"count" => Ok(Command::SetCount(parse_number(value)?)),
					"seed" if value.eq_ignore_ascii_case("none") => Ok(Command::SetSeed(None)),
					"seed" => Ok(Command::SetSeed(Some(parse_number(value)?))),
					_ => Err(CommandError::UnknownSetting(key)),
				}
			}
			"unset" => match rest.to_lowercase().as_str() {
				"output" => Ok(Command::UnsetOutput),
				"" => Err(CommandError::MissingValue("unset".to_owned())),
				other => Err(CommandError::UnknownSetting(other.to_owned())),
			},
			"show" => Ok(Command::Show),
			"categories" | "types" => Ok(Command::Categories),
			"generate" => Ok(Command::Generate),
			"save" => Ok(Command::Save),
			"help" | "?" => Ok(Command::Help),
			"exit" | "quit" => Ok(Command::Exit),
			_ => Err(CommandError::Unknown(word.to_owned())),
		}
	}
}
