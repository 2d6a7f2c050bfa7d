use std::io::Write;
use std::path::PathBuf;

use log::info;
use wordlist_gen_core::io::resolve_output_path;
use wordlist_gen_core::{
	Category, GenerationConfig, GenerationOutcome, Generator, DEFAULT_COUNT, DEFAULT_MAX_ENTRIES, MAX_LENGTH,
};

use crate::command::{Command, CommandError};

pub const HELP: &str = "\
Commands:
  set length <1-8>             Password length (padding width in sequential mode)
  set type <category>          Character type, see 'categories'
  set output <filename>        Write the list to <output dir>/<filename>
  unset output                 Print the list instead of writing it
  set sequential_start <int>   First number of a sequential list
  set sequential_end <int>     Last number of a sequential list
  set count <n>                Number of random entries (default 10000)
  set seed <n|none>            Fixed seed for reproducible lists
  show                         Print the current settings
  categories                   List the character types
  generate                     Generate (and write if an output is set)
  save                         Generate and write, an output is required
  help                         Print this help
  exit                         Leave the shell";

/// What the loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Flow {
	Continue,
	Exit,
}

/// Settings accumulated by the shell between two `generate`.
///
/// Values are stored as entered; a fresh `GenerationConfig` is built and
/// validated on every generation.
#[derive(Debug)]
pub struct Session {
	output_dir: PathBuf,
	length: i64,
	category: Option<Category>,
	sequential_start: Option<String>,
	sequential_end: Option<String>,
	output: Option<String>,
	count: usize,
	max_entries: usize,
	seed: Option<u64>,
}

impl Session {
	pub fn new(output_dir: PathBuf) -> Self {
		Self {
			output_dir,
			length: MAX_LENGTH as i64,
			category: None,
			sequential_start: None,
			sequential_end: None,
			output: None,
			count: DEFAULT_COUNT,
			max_entries: DEFAULT_MAX_ENTRIES,
			seed: None,
		}
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn with_max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = max_entries;
		self
	}

	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	/// Builds the configuration of the next generation.
	pub fn config(&self) -> Result<GenerationConfig, CommandError> {
		let category = self.category.ok_or(CommandError::MissingType)?;
		let mut builder = GenerationConfig::builder()
			.length(self.length)
			.category(category)
			.count(self.count)
			.max_entries(self.max_entries)
			.seed(self.seed);

		if let Some(start) = &self.sequential_start {
			builder = builder.range_start_str(start);
		}
		if let Some(end) = &self.sequential_end {
			builder = builder.range_end_str(end);
		}
		if let Some(output) = &self.output {
			builder = builder.output_path(resolve_output_path(&self.output_dir, output)?);
		}

		Ok(builder.build()?)
	}

	/// Applies `command`, printing any result to `out`.
	pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, CommandError> {
		match command {
			Command::SetLength(length) => {
				self.length = length;
				writeln!(out, "Length set to {length}")?;
			}
			Command::SetType(category) => {
				self.category = Some(category);
				writeln!(out, "Type set to {category} ({})", category.description())?;
			}
			Command::SetOutput(output) => {
				let path = resolve_output_path(&self.output_dir, &output)?;
				writeln!(out, "Output set to {}", path.display())?;
				self.output = Some(output);
			}
			Command::UnsetOutput => {
				self.output = None;
				writeln!(out, "Output cleared, lists will be printed")?;
			}
			Command::SetSequentialStart(start) => {
				writeln!(out, "Sequential start set to {start}")?;
				self.sequential_start = Some(start);
			}
			Command::SetSequentialEnd(end) => {
				writeln!(out, "Sequential end set to {end}")?;
				self.sequential_end = Some(end);
			}
			Command::SetCount(count) => {
				self.count = count;
				writeln!(out, "Count set to {count}")?;
			}
			Command::SetSeed(seed) => {
				self.seed = seed;
				match seed {
					Some(seed) => writeln!(out, "Seed set to {seed}")?,
					None => writeln!(out, "Seed cleared")?,
				}
			}
			Command::Show => self.show(out)?,
			Command::Categories => {
				for category in Category::ALL {
					writeln!(out, "{}. {} ({})", category.menu_number(), category.description(), category)?;
				}
			}
			Command::Generate => {
				let config = self.config()?;
				info!("generating {} entries", config.expected_entries());
				match Generator::for_config(&config).run(&config)? {
					GenerationOutcome::Entries(list) => {
						writeln!(
							out,
							"Generated Password List (Length: {}, Type: {}):",
							list.length(),
							list.category()
						)?;
						for entry in list.entries() {
							writeln!(out, "{entry}")?;
						}
						writeln!(out, "Total passwords generated: {}", list.len())?;
					}
					GenerationOutcome::Saved(status) => writeln!(out, "{status}")?,
				}
			}
			Command::Save => {
				let config = self.config()?;
				let status = Generator::for_config(&config).save(&config)?;
				writeln!(out, "{status}")?;
			}
			Command::Help => writeln!(out, "{HELP}")?,
			Command::Exit => return Ok(Flow::Exit),
		}
		Ok(Flow::Continue)
	}

	fn show<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
		let unset = || "(not set)".to_owned();
		writeln!(out, "length:           {}", self.length)?;
		writeln!(out, "type:             {}", self.category.map_or_else(unset, |c| c.to_string()))?;
		writeln!(out, "sequential_start: {}", self.sequential_start.clone().unwrap_or_else(unset))?;
		writeln!(out, "sequential_end:   {}", self.sequential_end.clone().unwrap_or_else(unset))?;
		writeln!(out, "output:           {}", self.output.clone().unwrap_or_else(unset))?;
		writeln!(out, "output dir:       {}", self.output_dir.display())?;
		writeln!(out, "count:            {}", self.count)?;
		writeln!(out, "seed:             {}", self.seed.map_or_else(unset, |s| s.to_string()))?;
		Ok(())
	}
}
