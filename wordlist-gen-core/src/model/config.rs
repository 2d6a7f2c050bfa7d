use std::path::{Path, PathBuf};

use crate::error::GenError;
use crate::model::category::Category;

/// Shortest accepted entry length (and padding width).
pub const MIN_LENGTH: usize = 1;

/// Longest accepted entry length (and padding width).
pub const MAX_LENGTH: usize = 8;

/// Number of entries produced in character mode when no count is set.
pub const DEFAULT_COUNT: usize = 10_000;

/// Entry cap applied when none is set: the size of the widest
/// sequential range (`0..=99_999_999`).
pub const DEFAULT_MAX_ENTRIES: usize = 100_000_000;

/// A sequential bound as supplied by the caller.
///
/// Text bounds stay raw until `build`, which parses them after the
/// presence check and before the range check.
#[derive(Debug, Clone, PartialEq)]
enum Bound {
	Value(i64),
	Raw(String),
}

impl Bound {
	fn resolve(&self) -> Result<i64, GenError> {
		match self {
			Bound::Value(v) => Ok(*v),
			Bound::Raw(s) => s.trim().parse::<i64>().map_err(|_| GenError::NonIntegerBounds(s.clone())),
		}
	}
}

/// How entries are produced once a configuration is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
	/// Sample `count` entries from a character pool.
	Random { pool: &'static str, count: usize },
	/// Enumerate every integer of `start..=end`.
	Sequential { start: i64, end: i64 },
}

/// Validated, immutable generation settings.
///
/// A `GenerationConfig` can only be obtained through
/// [`GenerationConfigBuilder::build`], so every value held here already
/// satisfies the length, range and count constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
	length: usize,
	category: Category,
	mode: Mode,
	output_path: Option<PathBuf>,
	seed: Option<u64>,
}

impl GenerationConfig {
	pub fn builder() -> GenerationConfigBuilder {
		GenerationConfigBuilder::default()
	}

	pub fn length(&self) -> usize {
		self.length
	}

	pub fn category(&self) -> Category {
		self.category
	}

	pub fn mode(&self) -> &Mode {
		&self.mode
	}

	/// Where the list is written, if anywhere.
	pub fn output_path(&self) -> Option<&Path> {
		self.output_path.as_deref()
	}

	pub fn seed(&self) -> Option<u64> {
		self.seed
	}

	/// Number of entries a generation with this configuration yields.
	pub fn expected_entries(&self) -> usize {
		match self.mode {
			Mode::Random { count, .. } => count,
			Mode::Sequential { start, end } => (end - start + 1) as usize,
		}
	}
}

/// Builder collecting raw settings for a [`GenerationConfig`].
///
/// Setters never fail; everything is checked in [`build`](Self::build).
/// The bounds are ignored (and not validated) unless the category is
/// `Sequential`.
#[derive(Debug, Clone)]
pub struct GenerationConfigBuilder {
	length: i64,
	category: Option<Category>,
	range_start: Option<Bound>,
	range_end: Option<Bound>,
	output_path: Option<PathBuf>,
	count: usize,
	max_entries: usize,
	seed: Option<u64>,
}

impl Default for GenerationConfigBuilder {
	fn default() -> Self {
		Self {
			length: MAX_LENGTH as i64,
			category: None,
			range_start: None,
			range_end: None,
			output_path: None,
			count: DEFAULT_COUNT,
			max_entries: DEFAULT_MAX_ENTRIES,
			seed: None,
		}
	}
}

impl GenerationConfigBuilder {
	pub fn length(mut self, length: i64) -> Self {
		self.length = length;
		self
	}

	pub fn category(mut self, category: Category) -> Self {
		self.category = Some(category);
		self
	}

	pub fn range_start(mut self, start: i64) -> Self {
		self.range_start = Some(Bound::Value(start));
		self
	}

	pub fn range_end(mut self, end: i64) -> Self {
		self.range_end = Some(Bound::Value(end));
		self
	}

	/// Sets the start bound from unparsed text.
	pub fn range_start_str(mut self, start: &str) -> Self {
		self.range_start = Some(Bound::Raw(start.to_owned()));
		self
	}

	/// Sets the end bound from unparsed text.
	pub fn range_end_str(mut self, end: &str) -> Self {
		self.range_end = Some(Bound::Raw(end.to_owned()));
		self
	}

	pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.output_path = Some(path.into());
		self
	}

	pub fn count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Largest list `build` accepts, in both modes.
	pub fn max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = max_entries;
		self
	}

	pub fn seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	/// Validates the settings and freezes them.
	///
	/// # Errors
	/// - `InvalidCategory` if no category was set
	/// - Sequential mode, in this order: `MissingRangeBounds`,
	///   `NonIntegerBounds`, `InvalidRange`, `InvalidLength`, then
	///   `RangeExceedsWidth` when `end` has more than `length` digits
	/// - Character mode: `InvalidLength`, then `InvalidCount`
	/// - Both modes, last: `TooManyEntries` above the entry cap
	pub fn build(self) -> Result<GenerationConfig, GenError> {
		let category = self.category.ok_or_else(|| GenError::InvalidCategory(String::new()))?;

		let mode = if category.is_sequential() {
			let (start, end) = match (&self.range_start, &self.range_end) {
				(Some(start), Some(end)) => (start, end),
				_ => return Err(GenError::MissingRangeBounds),
			};
			let start = start.resolve()?;
			let end = end.resolve()?;
			validate_range(start, end)?;
			let length = validate_length(self.length)?;
			validate_width(end, length)?;
			validate_entries((end - start + 1) as usize, self.max_entries)?;
			Mode::Sequential { start, end }
		} else {
			validate_length(self.length)?;
			if self.count == 0 {
				return Err(GenError::InvalidCount);
			}
			validate_entries(self.count, self.max_entries)?;
			Mode::Random { pool: category.pool()?, count: self.count }
		};

		Ok(GenerationConfig {
			length: self.length as usize,
			category,
			mode,
			output_path: self.output_path,
			seed: self.seed,
		})
	}
}

/// Checks that `length` is within `[MIN_LENGTH, MAX_LENGTH]`.
pub fn validate_length(length: i64) -> Result<usize, GenError> {
	if (MIN_LENGTH as i64..=MAX_LENGTH as i64).contains(&length) {
		Ok(length as usize)
	} else {
		Err(GenError::InvalidLength(length))
	}
}

/// Checks that `start` is not negative and strictly lower than `end`.
pub fn validate_range(start: i64, end: i64) -> Result<(), GenError> {
	if start < 0 || start >= end {
		return Err(GenError::InvalidRange { start, end });
	}
	Ok(())
}

/// Checks that `end` fits in `length` decimal digits.
pub fn validate_width(end: i64, length: usize) -> Result<(), GenError> {
	let max = 10_i64.pow(length as u32) - 1;
	if end > max {
		return Err(GenError::RangeExceedsWidth { end, length });
	}
	Ok(())
}

/// Checks that a list of `requested` entries stays within `max`.
pub fn validate_entries(requested: usize, max: usize) -> Result<(), GenError> {
	if requested > max {
		return Err(GenError::TooManyEntries { requested, max });
	}
	Ok(())
}
