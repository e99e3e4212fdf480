//! Expansion of command-line file arguments

use glob::{glob, PatternError};
use log::warn;
use std::path::PathBuf;

/// Expand glob patterns into the files they name, in argument order
///
/// Patterns that match no file and entries that cannot be read are logged and
/// skipped. Only a malformed pattern is an error.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, PatternError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let before = files.len();

        for entry in glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping {}: {}", e.path().display(), e.error()),
            }
        }

        if files.len() == before {
            warn!("No files match '{}'", pattern);
        }
    }

    Ok(files)
}
