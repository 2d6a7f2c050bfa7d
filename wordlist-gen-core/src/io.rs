use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::GenError;
use crate::model::generator::SaveStatus;

/// Directory lists are written to when only a filename is given.
pub const DEFAULT_OUTPUT_DIR: &str = "wordlist";

/// Joins an output filename under `output_dir`.
///
/// - An empty (or blank) filename yields `MissingOutputTarget`
/// - A filename that is absolute or holds anything but plain names
///   (`..`, `.`, a root or a drive prefix) yields `InvalidOutputTarget`,
///   so the result always stays inside `output_dir`
///
/// Example:
/// `"wordlist"` + `"digits.txt"` → `wordlist/digits.txt`
pub fn resolve_output_path<P: AsRef<Path>>(output_dir: P, filename: &str) -> Result<PathBuf, GenError> {
	let filename = filename.trim();
	if filename.is_empty() {
		return Err(GenError::MissingOutputTarget);
	}

	let relative = Path::new(filename);
	if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
		return Err(GenError::InvalidOutputTarget(filename.to_owned()));
	}
	Ok(output_dir.as_ref().join(relative))
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Writes `entries` to `path`, one per line, each followed by `\n`.
///
/// - Creates the parent directory if it does not exist
/// - Writes into a temporary file next to `path`, then renames it over
///   `path`: a failed write never leaves a truncated list behind
///
/// # Errors
/// `Io` wrapping the OS error if the directory, the file or the rename fails.
pub fn write_wordlist<P: AsRef<Path>>(entries: &[String], path: P) -> Result<SaveStatus, GenError> {
	let path = path.as_ref();
	let parent = match path.parent() {
		Some(p) if !p.as_os_str().is_empty() => p,
		_ => Path::new("."),
	};

	fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;

	let mut file = NamedTempFile::new_in(parent).map_err(|e| GenError::io(path, e))?;
	{
		let mut writer = BufWriter::new(file.as_file_mut());
		for entry in entries {
			writer.write_all(entry.as_bytes()).map_err(|e| GenError::io(path, e))?;
			writer.write_all(b"\n").map_err(|e| GenError::io(path, e))?;
		}
		writer.flush().map_err(|e| GenError::io(path, e))?;
	}
	file.persist(path).map_err(|e| GenError::io(path, e.error))?;

	let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	debug!("wrote {} entries to {}", entries.len(), resolved.display());
	Ok(SaveStatus::new(resolved, entries.len()))
}
