//! Raw response archive writer

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to serialize archive: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Writes the ordered raw page payloads as one pretty-printed JSON array.
///
/// Whole-file overwrite semantics: each run replaces the previous artifact
/// rather than appending to it.
pub fn write_archive(path: &Path, pages: &[Value]) -> ArchiveResult<()> {
    let json = serde_json::to_string_pretty(pages)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_writes_pages_in_order() {
        let file = NamedTempFile::new().unwrap();
        let pages = vec![json!({"page": 0}), json!({"page": 1})];

        write_archive(file.path(), &pages).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["page"], 0);
        assert_eq!(parsed[1]["page"], 1);
    }

    #[test]
    fn test_overwrites_previous_archive() {
        let file = NamedTempFile::new().unwrap();

        write_archive(file.path(), &[json!({"page": 0}), json!({"page": 1})]).unwrap();
        write_archive(file.path(), &[json!({"page": 9})]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["page"], 9);
    }

    #[test]
    fn test_empty_run_writes_empty_array() {
        let file = NamedTempFile::new().unwrap();

        write_archive(file.path(), &[]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_output_is_human_readable() {
        let file = NamedTempFile::new().unwrap();

        write_archive(file.path(), &[json!({"hits": {"total": 1}})]).unwrap();

        // Pretty printing puts nested keys on their own indented lines.
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\n    \"hits\""));
    }
}
