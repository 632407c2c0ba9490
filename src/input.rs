use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::document::Document;

/// Metadata key holding where a document was read from
pub const SOURCE_KEY: &str = "source";

/// Path given on the command line to mean standard input
pub const STDIN_PATH: &str = "-";

/// Check if a path should be skipped while walking a directory
pub fn should_ignore(path: &Path) -> bool {
    let ignored_dirs = [
        ".git",
        ".svn",
        ".hg",
        "target",
        "node_modules",
        "__pycache__",
        ".venv",
        "venv",
    ];

    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| ignored_dirs.contains(&name))
    })
}

/// Hex SHA-256 of a chunk's text
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Read every input into a document tagged with its source.
///
/// `-` reads standard input, directories are walked recursively, and files
/// that are not valid UTF-8 are skipped with a warning.
pub fn collect_documents<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input == Path::new(STDIN_PATH) {
            documents.push(read_stdin()?);
        } else if input.is_dir() {
            documents.extend(collect_dir(input)?);
        } else {
            let content = fs::read_to_string(input)
                .with_context(|| format!("Failed to read file: {}", input.display()))?;
            documents.push(
                Document::new(content).with_metadata(SOURCE_KEY, input.display().to_string()),
            );
        }
    }

    Ok(documents)
}

/// Read standard input as a single document
pub fn read_stdin() -> Result<Document> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read standard input")?;
    Ok(Document::new(content).with_metadata(SOURCE_KEY, STDIN_PATH))
}

fn collect_dir(root: &Path) -> Result<Vec<Document>> {
    info!(root = %root.display(), "scanning directory");

    let mut documents = Vec::new();
    let mut total_bytes = 0usize;

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !should_ignore(e.path().strip_prefix(root).unwrap_or(e.path())))
    {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        total_bytes += content.len();
        documents.push(
            Document::new(content).with_metadata(SOURCE_KEY, path.display().to_string()),
        );
    }

    info!(
        root = %root.display(),
        files = documents.len(),
        bytes = total_bytes,
        "collected documents"
    );

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_ignore() {
        assert!(should_ignore(Path::new("target/debug/notes.txt")));
        assert!(should_ignore(Path::new("docs/node_modules/readme.md")));
        assert!(should_ignore(Path::new(".git/config")));
        assert!(!should_ignore(Path::new("docs/guide.md")));
        assert!(!should_ignore(Path::new("targets.txt")));
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(
            content_hash("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_ne!(content_hash("hello"), content_hash("hello "));
    }

    #[test]
    fn test_collect_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "first\n\nsecond").unwrap();

        let documents = collect_documents(&[&path]).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content, "first\n\nsecond");
        assert_eq!(documents[0].metadata[SOURCE_KEY], path.display().to_string());
    }

    #[test]
    fn test_collect_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "bravo").unwrap();
        fs::write(dir.path().join("a.md"), "alpha").unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("target").join("out.txt"), "ignored").unwrap();
        fs::write(dir.path().join("blob.bin"), [0xFF, 0xFE, 0x00]).unwrap();

        let documents = collect_documents(&[dir.path()]).unwrap();
        let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_collect_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_documents(&[dir.path().join("missing.txt")]);
        assert!(result.is_err());
    }
}
