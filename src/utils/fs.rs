use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::utils::error::{IsleError, Result};

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::create_dir_all(path.as_ref()).map_err(|e| IsleError::io(path.as_ref(), e))
}

/// Read a file to string
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(path.as_ref()).map_err(|e| IsleError::io(path.as_ref(), e))
}

/// Write a string to a file, creating parent directories as needed
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        create_directory(parent)?;
    }

    fs::write(path.as_ref(), contents).map_err(|e| IsleError::io(path.as_ref(), e))
}

/// Remove a directory and everything below it; a missing directory is fine
pub fn remove_directory<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(path).map_err(|e| IsleError::io(path, e))?;
    Ok(true)
}

/// List files under `dir` whose extension is one of `extensions`, sorted by path.
///
/// A directory that cannot be walked, including a missing one, is an error.
pub fn list_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> std::result::Result<Vec<PathBuf>, walkdir::Error> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && has_any_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Check whether the path ends with one of the given extensions (case-insensitive)
pub fn has_any_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
        }
        None => false,
    }
}
