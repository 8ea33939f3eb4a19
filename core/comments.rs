use crate::error::{AppError, Result};
use crate::output_formats::{serialize_to_json, write_file};
use indexmap::IndexMap;
use log;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Relative path (directories suffixed with `/`) to free-text comment, in file order.
pub type CommentMap = IndexMap<String, String>;

/// Reads the comment file. `Ok(None)` means the file does not exist yet.
pub fn read(path: &Path) -> Result<Option<CommentMap>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::FileRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    // null values read as blank comments, which `save` then drops
    let raw: IndexMap<String, Option<String>> =
        serde_json::from_str(&content).map_err(|source| AppError::CommentParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(
        raw.into_iter()
            .map(|(key, comment)| (key, comment.unwrap_or_default()))
            .collect(),
    ))
}

/// Writes `defaults` as a fresh comment file.
pub fn initialize(path: &Path, defaults: &CommentMap) -> Result<()> {
    write_file(path, &serialize_to_json(defaults)?)
}

/// Load-or-create. A malformed file falls back to `defaults` with a warning.
pub fn load(path: &Path, defaults: &CommentMap) -> Result<CommentMap> {
    match read(path) {
        Ok(Some(comments)) => {
            log::info!("Loaded comments from {}", path.display());
            Ok(comments)
        }
        Ok(None) => {
            initialize(path, defaults)?;
            log::info!("Created new comments JSON at {}", path.display());
            Ok(defaults.clone())
        }
        Err(AppError::CommentParse { path, source }) => {
            log::warn!(
                "Failed to parse comments JSON at {} ({}), using defaults",
                path.display(),
                source
            );
            Ok(defaults.clone())
        }
        Err(e) => Err(e),
    }
}

/// Drops blank comments and writes the rest in map order.
/// Returns the number of comments written.
pub fn save(path: &Path, comments: &CommentMap) -> Result<usize> {
    let filtered: CommentMap = comments
        .iter()
        .filter(|(_, comment)| !comment.trim().is_empty())
        .map(|(key, comment)| (key.clone(), comment.clone()))
        .collect();
    log::debug!(
        "Saving {} of {} comments to {}",
        filtered.len(),
        comments.len(),
        path.display()
    );
    write_file(path, &serialize_to_json(&filtered)?)?;
    Ok(filtered.len())
}
