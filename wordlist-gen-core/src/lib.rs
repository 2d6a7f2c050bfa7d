//! Password wordlist generation library.
//!
//! This crate provides:
//! - Character-set categories and their pools
//! - Random fixed-length entries sampled from a pool
//! - Exhaustive zero-padded numeric sequences
//! - Newline-delimited output files
//!
//! Every generation is described by an immutable `GenerationConfig`;
//! nothing is shared between calls.

/// Error type shared by every operation of the crate.
pub mod error;

/// Categories, configuration and generators.
pub mod model;

/// Output sink (directory creation, atomic file writes, path helpers).
pub mod io;

pub use error::{ErrorKind, GenError};
pub use model::category::Category;
pub use model::config::{GenerationConfig, GenerationConfigBuilder, DEFAULT_COUNT, DEFAULT_MAX_ENTRIES, MAX_LENGTH, MIN_LENGTH};
pub use model::generator::{generate, GenerationOutcome, Generator, SaveStatus, Wordlist};
