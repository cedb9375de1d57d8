//! Whitespace-separated matrix files.
//!
//! ## Purpose
//!
//! This module writes and reads dense row-major matrices as plain text: one
//! row per line, values separated by a single space.
//!
//! ## Design notes
//!
//! * **Directories**: The target directory is created if it does not exist.
//! * **Overwrite**: An existing file is replaced only when `overwrite` is set;
//!   otherwise the call fails with [`RlsError::FileExists`] and writes nothing.
//! * **Precision**: Values are written with `Display`, which for `f32`/`f64`
//!   is the shortest representation that parses back to the same value.

// External dependencies
use std::fmt::Display;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

// Internal dependencies
use crate::primitives::errors::RlsError;

/// Write `data` (`rows x n_cols`, row-major) to `directory/filename`.
///
/// # Panics
///
/// Panics if `n_cols` is zero or does not divide `data.len()`.
pub fn save_matrix<T: Display>(
    directory: &Path,
    filename: &str,
    data: &[T],
    n_cols: usize,
    overwrite: bool,
) -> Result<(), RlsError> {
    assert!(n_cols > 0, "matrix must have at least one column");
    assert_eq!(
        data.len() % n_cols,
        0,
        "{} values do not form rows of width {}",
        data.len(),
        n_cols
    );

    let path = directory.join(filename);
    if path.exists() && !overwrite {
        return Err(RlsError::FileExists {
            path: path.display().to_string(),
        });
    }
    fs::create_dir_all(directory)?;

    let mut writer = BufWriter::new(fs::File::create(&path)?);
    for row in data.chunks_exact(n_cols) {
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", value)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a matrix written by [`save_matrix`].
///
/// Returns the values (row-major) and the column count. Blank lines are
/// skipped; an empty file yields no values and zero columns.
#[cfg(feature = "dev")]
pub fn load_matrix<T: std::str::FromStr>(path: &Path) -> Result<(Vec<T>, usize), RlsError> {
    let text = fs::read_to_string(path)?;
    let mut data = Vec::new();
    let mut n_cols = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let before = data.len();
        for token in line.split_whitespace() {
            let value = token.parse::<T>().map_err(|_| {
                RlsError::Parse(format!(
                    "{}:{}: '{}' is not a number",
                    path.display(),
                    line_no + 1,
                    token
                ))
            })?;
            data.push(value);
        }
        let width = data.len() - before;
        match n_cols {
            None => n_cols = Some(width),
            Some(expected) if expected != width => {
                return Err(RlsError::Parse(format!(
                    "{}:{}: expected {} values, found {}",
                    path.display(),
                    line_no + 1,
                    expected,
                    width
                )));
            }
            Some(_) => {}
        }
    }

    Ok((data, n_cols.unwrap_or(0)))
}
