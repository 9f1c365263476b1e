//! File-backed entry storage.
//!
//! Each entry lives in the entries directory as `<title>.md`. The store
//! keeps no state beyond the directory path; every call hits the
//! filesystem, so concurrent readers always observe the latest write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access entry storage: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to list entries: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid entry title: {0:?}")]
    InvalidTitle(String),
}

/// Store of wiki entries rooted at a directory of `.md` files.
#[derive(Debug, Clone)]
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the entries directory if it does not exist yet.
    pub fn ensure(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// All stored entry titles, case-preserved and lexicographically
    /// sorted. Non-`.md` files in the directory are ignored.
    pub fn list_entries(&self) -> Result<Vec<String>, StoreError> {
        let mut titles = Vec::new();
        for dirent in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let dirent = dirent?;
            if !dirent.file_type().is_file() {
                continue;
            }
            let path = dirent.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                titles.push(stem.to_string());
            }
        }
        titles.sort();
        Ok(titles)
    }

    /// Raw Markdown content of an entry, or `None` if no such entry
    /// exists. Title matching is exact.
    pub fn get_entry(&self, title: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(title)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Create or replace an entry. Any existing file with the same title
    /// is deleted first, then the new content is written.
    pub fn save_entry(&self, title: &str, content: &str) -> Result<(), StoreError> {
        let path = self.entry_path(title)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        fs::write(&path, content)?;
        tracing::debug!(title, bytes = content.len(), "saved entry");
        Ok(())
    }

    /// Look up a title case-insensitively and return the stored casing.
    /// Used by the duplicate-title check and the search redirect.
    pub fn canonical_title(&self, title: &str) -> Result<Option<String>, StoreError> {
        let needle = title.to_lowercase();
        Ok(self
            .list_entries()?
            .into_iter()
            .find(|t| t.to_lowercase() == needle))
    }

    /// Path for a title, after rejecting titles that would escape the
    /// entries directory.
    fn entry_path(&self, title: &str) -> Result<PathBuf, StoreError> {
        if title.trim().is_empty()
            || title.contains('/')
            || title.contains('\\')
            || title.contains("..")
        {
            return Err(StoreError::InvalidTitle(title.to_string()));
        }
        Ok(self.root.join(format!("{title}.md")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, EntryStore) {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path());
        store.ensure().unwrap();
        (dir, store)
    }

    #[test]
    fn save_then_get_roundtrips() {
        let (_dir, store) = store();
        store.save_entry("Rust", "# Rust\nA language.").unwrap();
        assert_eq!(
            store.get_entry("Rust").unwrap().as_deref(),
            Some("# Rust\nA language.")
        );
    }

    #[test]
    fn missing_entry_is_none() {
        let (_dir, store) = store();
        assert!(store.get_entry("Nope").unwrap().is_none());
    }

    #[test]
    fn save_replaces_existing_content() {
        let (_dir, store) = store();
        store.save_entry("Page", "old").unwrap();
        store.save_entry("Page", "new").unwrap();
        assert_eq!(store.get_entry("Page").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn list_is_sorted_and_skips_other_files() {
        let (dir, store) = store();
        store.save_entry("Zebra", "z").unwrap();
        store.save_entry("Apple", "a").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        assert_eq!(store.list_entries().unwrap(), vec!["Apple", "Zebra"]);
    }

    #[test]
    fn canonical_title_ignores_case() {
        let (_dir, store) = store();
        store.save_entry("Rust", "x").unwrap();
        assert_eq!(
            store.canonical_title("rUsT").unwrap().as_deref(),
            Some("Rust")
        );
        assert!(store.canonical_title("Go").unwrap().is_none());
    }

    #[test]
    fn titles_escaping_the_directory_are_rejected() {
        let (_dir, store) = store();
        for bad in ["", "   ", "../evil", "a/b", "a\\b"] {
            assert!(matches!(
                store.save_entry(bad, "x"),
                Err(StoreError::InvalidTitle(_))
            ));
        }
    }
}
