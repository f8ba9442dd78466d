//! JSON file persistence.
//!
//! Each collection is one pretty-printed JSON array, read whole and
//! rewritten whole. Writes go straight to the target file; there is no
//! temp-file-and-rename step.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Create a directory and its parents if they don't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Load every record from a JSON array file.
///
/// A missing file and an empty (or whitespace-only) file both load as an
/// empty collection.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// the expected records.
pub fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<R> = serde_json::from_str(&text).map_err(|source| Error::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Overwrite a file with the given records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn save_records<R: Serialize>(path: &Path, records: &[R]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
