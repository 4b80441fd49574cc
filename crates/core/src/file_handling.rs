//! Reading, writing and validation of the snippet file.
//!
//! Snippets are stored as a YAML list. A missing file is treated as an empty
//! store so the first run works without any setup; everything else that goes
//! wrong surfaces as a structured error naming the file and the action.

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::Path;

use crate::error::Error::{DuplicateSnippetDescription, EmptySnippetDescription};
use crate::error::{Error, Result};
use crate::snippet::SnippetDefinition;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Loads and validates snippet definitions from the snippet file.
///
/// A path that does not exist yet yields an empty list rather than an error,
/// since that is the normal state before the first `shelf new`.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
/// - A snippet has an empty description
/// - Two snippets share a description
pub fn load_snippets(path: &str) -> Result<Vec<SnippetDefinition>> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }

    let reader = get_reader("snippet", path)?;

    let parsed: serde_yaml::Result<Vec<SnippetDefinition>> = serde_yaml::from_reader(reader);

    let snippets = parsed.map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "snippet".to_string(),
            path.to_string(),
            e,
        )
    })?;

    validate_descriptions(&snippets, path)?;

    Ok(snippets)
}

/// Writes snippet definitions to the snippet file.
///
/// Creates the parent directory if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, or if
/// serialization to YAML fails.
pub fn save_snippets(path: &str, snippets: &[SnippetDefinition]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io_error("snippet".to_string(), path.to_string(), e)
            })?;
        }
    }

    let f = File::create(path);

    let Ok(f) = f else {
        return Err(Error::io_error(
            "snippet".to_string(),
            path.to_string(),
            f.unwrap_err(),
        ));
    };

    serde_yaml::to_writer(f, &snippets).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "snippet".to_string(),
            path.to_string(),
            e,
        )
    })
}

fn validate_descriptions(snippets: &[SnippetDefinition], path: &str) -> Result<()> {
    let mut seen = HashSet::new();

    for snippet in snippets {
        if snippet.description.trim().is_empty() {
            return Err(EmptySnippetDescription(path.to_string()));
        }

        if !seen.insert(snippet.description.as_str()) {
            // Found a duplicate description
            return Err(DuplicateSnippetDescription(snippet.description.clone()));
        }
    }

    Ok(())
}
