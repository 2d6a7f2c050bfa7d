use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by configuration, generation and output.
///
/// Configuration errors are always raised before any entry is produced,
/// so an `Err` never comes with a partial list.
#[derive(Debug, Error)]
pub enum GenError {
	/// The category selector is not a known tag.
	#[error("Invalid character type option '{0}'")]
	InvalidCategory(String),

	/// The length (or padding width) is outside `[1, 8]`.
	#[error("Invalid length option {0}. Length should be between 1 and 8")]
	InvalidLength(i64),

	/// Sequential mode without a start or an end bound.
	#[error("Sequential mode needs both a start and an end value")]
	MissingRangeBounds,

	/// A sequential bound given as text does not parse as an integer.
	#[error("Sequential bound '{0}' is not an integer")]
	NonIntegerBounds(String),

	/// The start bound is negative, or not strictly lower than the end.
	#[error("Invalid range {start}..{end}: start must be positive or zero and lower than end")]
	InvalidRange { start: i64, end: i64 },

	/// The range end has more digits than the padding width allows.
	#[error("Range end {end} does not fit in {length} digits")]
	RangeExceedsWidth { end: i64, length: usize },

	/// A random list was asked for zero entries.
	#[error("Entry count must be at least 1")]
	InvalidCount,

	/// The list would hold more entries than the configured maximum.
	#[error("{requested} entries requested, at most {max} allowed")]
	TooManyEntries { requested: usize, max: usize },

	/// Saving was asked without an output filename.
	#[error("No output file configured")]
	MissingOutputTarget,

	/// The output filename is absolute or leaves the output directory.
	#[error("Invalid output file '{0}': use a relative path inside the output directory")]
	InvalidOutputTarget(String),

	/// A character-mode pool has no symbol.
	#[error("Character pool is empty")]
	EmptyCharacterPool,

	/// Creating the directory or writing the file failed.
	#[error("Failed to write '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Discriminant of a [`GenError`], for callers that only need to branch
/// on the kind of failure (selector, parameter value, output).
///
/// `RangeExceedsWidth` is reported as `InvalidRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Unknown or missing category.
	InvalidCategory,
	/// Length outside `[1, 8]`.
	InvalidLength,
	/// Sequential bound not given.
	MissingRangeBounds,
	/// Sequential bound not an integer.
	NonIntegerBounds,
	/// Bad bound order, negative start, or end too wide for the padding.
	InvalidRange,
	/// Zero entries requested.
	InvalidCount,
	/// More entries than allowed.
	TooManyEntries,
	/// No output filename.
	MissingOutputTarget,
	/// Output filename outside the output directory.
	InvalidOutputTarget,
	/// Empty character pool.
	EmptyCharacterPool,
	/// Directory or file write failure.
	IoFailure,
}

impl GenError {
	/// Returns the discriminant of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidCategory(_) => ErrorKind::InvalidCategory,
			Self::InvalidLength(_) => ErrorKind::InvalidLength,
			Self::MissingRangeBounds => ErrorKind::MissingRangeBounds,
			Self::NonIntegerBounds(_) => ErrorKind::NonIntegerBounds,
			Self::InvalidRange { .. } | Self::RangeExceedsWidth { .. } => ErrorKind::InvalidRange,
			Self::InvalidCount => ErrorKind::InvalidCount,
			Self::TooManyEntries { .. } => ErrorKind::TooManyEntries,
			Self::MissingOutputTarget => ErrorKind::MissingOutputTarget,
			Self::InvalidOutputTarget(_) => ErrorKind::InvalidOutputTarget,
			Self::EmptyCharacterPool => ErrorKind::EmptyCharacterPool,
			Self::Io { .. } => ErrorKind::IoFailure,
		}
	}

	/// True when the error comes from the configuration rather than the
	/// output file.
	pub fn is_config_error(&self) -> bool {
		!matches!(self.kind(), ErrorKind::IoFailure)
	}

	pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
