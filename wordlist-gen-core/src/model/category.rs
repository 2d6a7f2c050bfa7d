use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

macro_rules! digits {
	() => {
		"0123456789"
	};
}

macro_rules! lower {
	() => {
		"abcdefghijklmnopqrstuvwxyz"
	};
}

macro_rules! upper {
	() => {
		"ABCDEFGHIJKLMNOPQRSTUVWXYZ"
	};
}

macro_rules! punctuation {
	() => {
		r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##
	};
}

const DIGITS: &str = digits!();
const LOWER: &str = lower!();
const UPPER: &str = upper!();
const MIXED_CASE: &str = concat!(lower!(), upper!());
const LOWER_DIGITS: &str = concat!(lower!(), digits!());
const UPPER_DIGITS: &str = concat!(upper!(), digits!());
const MIXED_DIGITS: &str = concat!(lower!(), upper!(), digits!());
const RANDOM_ALL: &str = concat!(lower!(), upper!(), digits!(), punctuation!());

/// Selector deciding which character pool (or the sequential mode)
/// drives generation.
///
/// Parsing accepts, case-insensitively:
/// - the canonical names (`random_all`, `digits`, ..., `sequential`)
/// - the legacy menu names (`random`, `numbers`, `english_lower`, ...)
/// - the menu numbers `1` to `9`
///
/// Serializes as the canonical name and deserializes through the same
/// lenient parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Category {
	RandomAll,
	Digits,
	Lower,
	Upper,
	MixedCase,
	LowerDigits,
	UpperDigits,
	MixedDigits,
	Sequential,
}

impl Category {
	/// Every category, in menu order.
	pub const ALL: [Category; 9] = [
		Category::RandomAll,
		Category::Digits,
		Category::Lower,
		Category::Upper,
		Category::MixedCase,
		Category::LowerDigits,
		Category::UpperDigits,
		Category::MixedDigits,
		Category::Sequential,
	];

	/// Canonical tag of the category.
	pub fn name(self) -> &'static str {
		match self {
			Category::RandomAll => "random_all",
			Category::Digits => "digits",
			Category::Lower => "lower",
			Category::Upper => "upper",
			Category::MixedCase => "mixed_case",
			Category::LowerDigits => "lower_digits",
			Category::UpperDigits => "upper_digits",
			Category::MixedDigits => "mixed_digits",
			Category::Sequential => "sequential",
		}
	}

	/// Human readable label, as printed in the category menu.
	pub fn description(self) -> &'static str {
		match self {
			Category::RandomAll => "Random (numbers, letters, symbols)",
			Category::Digits => "Numbers only (0-9)",
			Category::Lower => "English lowercase letters",
			Category::Upper => "English uppercase letters",
			Category::MixedCase => "English both case letters",
			Category::LowerDigits => "Numbers and lowercase letters",
			Category::UpperDigits => "Numbers and uppercase letters",
			Category::MixedDigits => "Numbers, uppercase, and lowercase letters",
			Category::Sequential => "Sequential numbers (zero padded range)",
		}
	}

	/// Position of the category in the menu (1-based).
	pub fn menu_number(self) -> usize {
		Self::ALL.iter().position(|c| *c == self).map_or(0, |i| i + 1)
	}

	pub fn is_sequential(self) -> bool {
		self == Category::Sequential
	}

	/// Resolves the character pool of a character-mode category.
	///
	/// The returned pool is order-stable. `Sequential` has no pool and
	/// yields `InvalidCategory`.
	pub fn pool(self) -> Result<&'static str, GenError> {
		match self {
			Category::RandomAll => Ok(RANDOM_ALL),
			Category::Digits => Ok(DIGITS),
			Category::Lower => Ok(LOWER),
			Category::Upper => Ok(UPPER),
			Category::MixedCase => Ok(MIXED_CASE),
			Category::LowerDigits => Ok(LOWER_DIGITS),
			Category::UpperDigits => Ok(UPPER_DIGITS),
			Category::MixedDigits => Ok(MIXED_DIGITS),
			Category::Sequential => Err(GenError::InvalidCategory(self.name().to_owned())),
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Category {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let tag = s.trim().to_lowercase();
		let category = match tag.as_str() {
			"1" | "random_all" | "random" => Category::RandomAll,
			"2" | "digits" | "numbers" => Category::Digits,
			"3" | "lower" | "english_lower" => Category::Lower,
			"4" | "upper" | "english_upper" => Category::Upper,
			"5" | "mixed_case" | "english_both" => Category::MixedCase,
			"6" | "lower_digits" | "alphanumeric_lower" => Category::LowerDigits,
			"7" | "upper_digits" | "alphanumeric_upper" => Category::UpperDigits,
			"8" | "mixed_digits" | "alphanumeric_both" => Category::MixedDigits,
			"9" | "sequential" => Category::Sequential,
			_ => return Err(GenError::InvalidCategory(s.trim().to_owned())),
		};
		Ok(category)
	}
}

impl TryFrom<String> for Category {
	type Error = GenError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn punctuation_is_ascii_punctuation() {
		let punctuation = punctuation!();
		assert_eq!(punctuation.len(), 32);
		assert!(punctuation.chars().all(|c| c.is_ascii_punctuation()));
		assert!(RANDOM_ALL.ends_with(punctuation));
	}

	#[test]
	fn composite_pools_have_no_repeated_symbol() {
		for category in Category::ALL.into_iter().filter(|c| !c.is_sequential()) {
			let mut symbols: Vec<char> = category.pool().unwrap().chars().collect();
			let total = symbols.len();
			symbols.sort();
			symbols.dedup();
			assert_eq!(symbols.len(), total, "{category}");
		}
	}

	#[test]
	fn pools_have_expected_sizes() {
		let sizes: Vec<usize> = Category::ALL
			.iter()
			.filter(|c| !c.is_sequential())
			.map(|c| c.pool().unwrap().len())
			.collect();
		assert_eq!(sizes, vec![94, 10, 26, 26, 52, 36, 36, 62]);
	}

	#[test]
	fn sequential_has_no_pool() {
		let err = Category::Sequential.pool().unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidCategory);
	}

	#[test]
	fn parse_accepts_names_legacy_names_and_numbers() {
		for category in Category::ALL {
			assert_eq!(category.name().parse::<Category>().unwrap(), category);
			assert_eq!(category.menu_number().to_string().parse::<Category>().unwrap(), category);
		}
		assert_eq!("numbers".parse::<Category>().unwrap(), Category::Digits);
		assert_eq!("alphanumeric_both".parse::<Category>().unwrap(), Category::MixedDigits);
		assert_eq!("  Mixed_Case ".parse::<Category>().unwrap(), Category::MixedCase);
	}

	#[test]
	fn unknown_tag_is_invalid_category() {
		match "UNKNOWN_TAG".parse::<Category>() {
			Err(GenError::InvalidCategory(tag)) => assert_eq!(tag, "UNKNOWN_TAG"),
			other => panic!("unexpected result: {other:?}"),
		}
		assert!("0".parse::<Category>().is_err());
		assert!("".parse::<Category>().is_err());
	}

	#[test]
	fn serde_uses_canonical_name_and_lenient_parser() {
		assert_eq!(serde_json::to_string(&Category::MixedDigits).unwrap(), "\"mixed_digits\"");
		let parsed: Category = serde_json::from_str("\"english_upper\"").unwrap();
		assert_eq!(parsed, Category::Upper);
		let err = serde_json::from_str::<Category>("\"UNKNOWN_TAG\"").unwrap_err();
		assert!(err.to_string().contains("UNKNOWN_TAG"));
	}
}
