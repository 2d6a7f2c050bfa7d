use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenError;
use crate::io;
use crate::model::category::Category;
use crate::model::config::{validate_length, validate_range, validate_width, GenerationConfig, Mode};

/// An ordered list of generated entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Wordlist {
	category: Category,
	length: usize,
	entries: Vec<String>,
}

impl Wordlist {
	pub fn category(&self) -> Category {
		self.category
	}

	pub fn length(&self) -> usize {
		self.length
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn into_entries(self) -> Vec<String> {
		self.entries
	}
}

/// Success status of a list written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveStatus {
	path: PathBuf,
	entries: usize,
}

impl SaveStatus {
	pub(crate) fn new(path: PathBuf, entries: usize) -> Self {
		Self { path, entries }
	}

	/// Resolved path of the written file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn entries(&self) -> usize {
		self.entries
	}
}

impl fmt::Display for SaveStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Password list saved to {} ({} entries)", self.path.display(), self.entries)
	}
}

/// Result of a successful [`Generator::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
	/// No output path was configured; the list is returned in memory.
	Entries(Wordlist),
	/// The list was written to the configured output path.
	Saved(SaveStatus),
}

/// List generator.
///
/// # Responsibilities
/// - Own the PRNG used for character-mode sampling
/// - Dispatch a validated [`GenerationConfig`] to the random or the
///   sequential path
/// - Hand the result to the output sink when a path is configured
///
/// A generator holds no configuration, each call is independent.
#[derive(Debug, Clone)]
pub struct Generator {
	rng: StdRng,
}

impl Default for Generator {
	fn default() -> Self {
		Self::new()
	}
}

impl Generator {
	/// Creates a generator seeded from the operating system.
	pub fn new() -> Self {
		Self { rng: StdRng::from_os_rng() }
	}

	/// Creates a reproducible generator.
	pub fn with_seed(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}

	/// Creates a generator honoring the seed of `config`, if any.
	pub fn for_config(config: &GenerationConfig) -> Self {
		match config.seed() {
			Some(seed) => Self::with_seed(seed),
			None => Self::new(),
		}
	}

	/// Produces the list described by `config`, in memory.
	///
	/// The output path of `config` is ignored here; see [`run`](Self::run).
	pub fn generate(&mut self, config: &GenerationConfig) -> Result<Wordlist, GenError> {
		let entries = match *config.mode() {
			Mode::Random { pool, count } => generate_random(pool, config.length(), count, &mut self.rng)?,
			Mode::Sequential { start, end } => generate_sequential(start, end, config.length())?,
		};
		debug!(
			"generated {} entries (category: {}, length: {})",
			entries.len(),
			config.category(),
			config.length()
		);
		Ok(Wordlist { category: config.category(), length: config.length(), entries })
	}

	/// Produces the list and writes it if `config` has an output path.
	pub fn run(&mut self, config: &GenerationConfig) -> Result<GenerationOutcome, GenError> {
		let wordlist = self.generate(config)?;
		match config.output_path() {
			Some(path) => Ok(GenerationOutcome::Saved(io::write_wordlist(wordlist.entries(), path)?)),
			None => Ok(GenerationOutcome::Entries(wordlist)),
		}
	}

	/// Produces the list and writes it, failing with `MissingOutputTarget`
	/// when `config` has no output path.
	pub fn save(&mut self, config: &GenerationConfig) -> Result<SaveStatus, GenError> {
		let path = config.output_path().ok_or(GenError::MissingOutputTarget)?;
		let wordlist = self.generate(config)?;
		io::write_wordlist(wordlist.entries(), path)
	}
}

/// Builds `count` entries of `length` symbols drawn uniformly, with
/// replacement, from `pool`.
///
/// Entries are not deduplicated.
///
/// # Errors
/// - `InvalidLength` if `length` is outside `[1, 8]`
/// - `EmptyCharacterPool` if `pool` is empty
pub fn generate_random<R: Rng>(
	pool: &str,
	length: usize,
	count: usize,
	rng: &mut R,
) -> Result<Vec<String>, GenError> {
	validate_length(length as i64)?;
	let symbols: Vec<char> = pool.chars().collect();
	if symbols.is_empty() {
		return Err(GenError::EmptyCharacterPool);
	}

	(0..count)
		.map(|_| {
			(0..length)
				.map(|_| symbols.choose(&mut *rng).copied().ok_or(GenError::EmptyCharacterPool))
				.collect::<Result<String, GenError>>()
		})
		.collect()
}

/// Enumerates `start..=end` in ascending order, each number left padded
/// with `'0'` to `length` digits.
///
/// # Errors
/// - `InvalidRange` if `start` is negative or `start >= end`
/// - `InvalidLength` if `length` is outside `[1, 8]`
/// - `RangeExceedsWidth` if `end` has more than `length` digits
pub fn generate_sequential(start: i64, end: i64, length: usize) -> Result<Vec<String>, GenError> {
	validate_range(start, end)?;
	let length = validate_length(length as i64)?;
	validate_width(end, length)?;

	Ok((start..=end).map(|i| format!("{i:0length$}")).collect())
}

/// Runs a fresh generator, seeded as `config` asks, on `config`.
pub fn generate(config: &GenerationConfig) -> Result<GenerationOutcome, GenError> {
	Generator::for_config(config).run(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use crate::model::config::DEFAULT_COUNT;

	fn config(category: Category, length: i64) -> GenerationConfig {
		GenerationConfig::builder().category(category).length(length).build().unwrap()
	}

	#[test]
	fn character_mode_entries_have_exact_length_and_pool_symbols() {
		let mut generator = Generator::with_seed(7);
		for category in Category::ALL.into_iter().filter(|c| !c.is_sequential()) {
			let pool = category.pool().unwrap();
			for length in 1..=8 {
				let list = generator.generate(&config(category, length)).unwrap();
				assert_eq!(list.len(), DEFAULT_COUNT);
				for entry in list.entries() {
					assert_eq!(entry.chars().count(), length as usize);
					assert!(entry.chars().all(|c| pool.contains(c)), "{entry} not in {category}");
				}
			}
		}
	}

	#[test]
	fn digits_of_length_three() {
		let list = Generator::new().generate(&config(Category::Digits, 3)).unwrap();
		assert_eq!(list.len(), 10_000);
		assert!(list.entries().iter().all(|e| e.len() == 3 && e.bytes().all(|b| b.is_ascii_digit())));
	}

	#[test]
	fn small_pool_produces_duplicates() {
		let list = Generator::with_seed(1).generate(&config(Category::Digits, 1)).unwrap();
		let mut unique = list.entries().to_vec();
		unique.sort();
		unique.dedup();
		assert_eq!(unique.len(), 10);
		assert_eq!(list.len(), 10_000);
	}

	#[test]
	fn same_seed_same_list() {
		let config = config(Category::RandomAll, 8);
		let a = Generator::with_seed(42).generate(&config).unwrap();
		let b = Generator::with_seed(42).generate(&config).unwrap();
		let c = Generator::with_seed(43).generate(&config).unwrap();
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn custom_count_is_honored() {
		let config = GenerationConfig::builder()
			.category(Category::Lower)
			.length(4)
			.count(25)
			.build()
			.unwrap();
		assert_eq!(Generator::new().generate(&config).unwrap().len(), 25);
	}

	#[test]
	fn random_rejects_bad_length_and_empty_pool() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(generate_random("abc", 0, 5, &mut rng).unwrap_err().kind(), ErrorKind::InvalidLength);
		assert_eq!(generate_random("abc", 9, 5, &mut rng).unwrap_err().kind(), ErrorKind::InvalidLength);
		assert_eq!(generate_random("", 3, 5, &mut rng).unwrap_err().kind(), ErrorKind::EmptyCharacterPool);
	}

	#[test]
	fn sampling_covers_the_whole_pool() {
		let mut rng = StdRng::seed_from_u64(7);
		let entries = generate_random("xyz", 4, 200, &mut rng).unwrap();
		assert!(entries.iter().all(|e| e.len() == 4 && e.chars().all(|c| "xyz".contains(c))));
		for symbol in ['x', 'y', 'z'] {
			assert!(entries.iter().any(|e| e.contains(symbol)));
		}
	}

	#[test]
	fn sequential_example() {
		assert_eq!(generate_sequential(5, 8, 3).unwrap(), vec!["005", "006", "007", "008"]);
	}

	#[test]
	fn sequential_two_element_range() {
		assert_eq!(generate_sequential(41, 42, 2).unwrap(), vec!["41", "42"]);
	}

	#[test]
	fn sequential_is_exhaustive_and_ascending() {
		let entries = generate_sequential(0, 9999, 4).unwrap();
		assert_eq!(entries.len(), 10_000);
		for (i, entry) in entries.iter().enumerate() {
			assert_eq!(entry.len(), 4);
			assert_eq!(entry.parse::<usize>().unwrap(), i);
		}
	}

	#[test]
	fn sequential_rejects_bad_input() {
		assert_eq!(generate_sequential(5, 5, 3).unwrap_err().kind(), ErrorKind::InvalidRange);
		assert_eq!(generate_sequential(8, 5, 3).unwrap_err().kind(), ErrorKind::InvalidRange);
		assert_eq!(generate_sequential(1, 5, 0).unwrap_err().kind(), ErrorKind::InvalidLength);
		assert_eq!(generate_sequential(1, 5, 9).unwrap_err().kind(), ErrorKind::InvalidLength);
		assert!(matches!(generate_sequential(1, 100, 2), Err(GenError::RangeExceedsWidth { .. })));
	}

	#[test]
	fn sequential_config_through_generator() {
		let config = GenerationConfig::builder()
			.category(Category::Sequential)
			.length(3)
			.range_start(5)
			.range_end(8)
			.build()
			.unwrap();
		let list = Generator::new().generate(&config).unwrap();
		assert_eq!(list.category(), Category::Sequential);
		assert_eq!(list.into_entries(), vec!["005", "006", "007", "008"]);
	}

	#[test]
	fn run_without_output_returns_entries() {
		let outcome = generate(&config(Category::Upper, 2)).unwrap();
		match outcome {
			GenerationOutcome::Entries(list) => assert_eq!(list.len(), DEFAULT_COUNT),
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn run_with_output_writes_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("seq.txt");
		let config = GenerationConfig::builder()
			.category(Category::Sequential)
			.length(2)
			.range_start(1)
			.range_end(3)
			.output_path(&path)
			.build()
			.unwrap();
		match generate(&config).unwrap() {
			GenerationOutcome::Saved(status) => {
				assert_eq!(status.entries(), 3);
				assert!(status.to_string().contains("3 entries"));
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "01\n02\n03\n");
	}

	#[test]
	fn save_without_output_is_missing_target() {
		let err = Generator::new().save(&config(Category::Lower, 3)).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::MissingOutputTarget);
	}
}
