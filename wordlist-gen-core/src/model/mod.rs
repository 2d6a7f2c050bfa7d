//! Top-level module for list generation.
//!
//! This module provides:
//! - The category selector and its character pools (`Category`)
//! - Validated generation settings (`GenerationConfig`)
//! - The random and sequential generators (`Generator`)

/// Category selector and character pool resolution.
pub mod category;

/// Generation settings, built and validated through
/// `GenerationConfigBuilder`.
///
/// Holds the length, category, sequential bounds, output path, entry
/// count and seed of a single generation.
pub mod config;

/// High-level generation interface.
///
/// Dispatches a configuration to random sampling or sequential
/// enumeration and optionally hands the result to the output sink.
pub mod generator;
