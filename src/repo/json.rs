//! JSON file store.
//!
//! The whole file is read into a [`MemoryRepository`] on open and written
//! back when the handle goes out of scope. The on-disk layout is one object
//! keyed by stringified id:
//!
//! ```json
//! { "1": { "id": 1, "title": "...", ... } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Confirmation, MemoryRepository, SnippetRepository};
use crate::error::Result;
use crate::model::Snippet;

pub struct JsonRepository {
    path: PathBuf,
    inner: MemoryRepository,
    dirty: bool,
}

impl JsonRepository {
    /// Load the store at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut snippets: BTreeMap<i64, Snippet> = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        // the object key is the id; a stale or missing `id` field follows it
        for (key, snippet) in snippets.iter_mut() {
            if snippet.id != Some(*key) {
                tracing::warn!(key, stored = ?snippet.id, "json entry id disagrees with its key");
                snippet.id = Some(*key);
            }
        }

        tracing::debug!(path = %path.display(), count = snippets.len(), "loaded json store");

        Ok(JsonRepository {
            path,
            inner: MemoryRepository::from_map(snippets),
            dirty: false,
        })
    }

    /// Flush and release the file, surfacing any write error.
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    fn write_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // write beside the target then rename so a failed write never truncates it
        let staging = self.path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(self.inner.as_map())?;
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = self.inner.len(),
            "flushed json store"
        );
        Ok(())
    }

    fn touched<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl SnippetRepository for JsonRepository {
    fn add(&mut self, snippet: Snippet) -> Result<Confirmation> {
        let result = self.inner.add(snippet);
        self.touched(result)
    }

    fn all(&self) -> Result<Vec<Snippet>> {
        self.inner.all()
    }

    fn get(&self, id: i64) -> Result<Snippet> {
        self.inner.get(id)
    }

    fn delete(&mut self, id: i64) -> Result<Confirmation> {
        let result = self.inner.delete(id);
        self.touched(result)
    }

    fn toggle_favorite(&mut self, id: i64) -> Result<Confirmation> {
        let result = self.inner.toggle_favorite(id);
        self.touched(result)
    }

    fn set_tags(&mut self, id: i64, tags: Option<String>) -> Result<()> {
        let result = self.inner.set_tags(id, tags);
        self.touched(result)
    }

    fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.write_file()?;
            self.dirty = false;
        }
        Ok(())
    }
}

impl Drop for JsonRepository {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!(path = %self.path.display(), "failed to write json store: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;
    use tempfile::TempDir;

    #[test]
    fn blank_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "").unwrap();
        let repo = JsonRepository::open(&path).unwrap();
        assert!(repo.all().unwrap().is_empty());
    }

    #[test]
    fn unchanged_store_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        drop(JsonRepository::open(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn failed_mutation_does_not_mark_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut repo = JsonRepository::open(&path).unwrap();
        assert!(repo.delete(4).is_err());
        drop(repo);
        assert!(!path.exists());
    }

    #[test]
    fn keys_are_stringified_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut repo = JsonRepository::open(&path).unwrap();
        repo.add(Snippet::new("t", "c", Language::Python).with_id(42)).unwrap();
        repo.close().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw["42"]["title"], "t");
    }

    #[test]
    fn key_wins_over_stored_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut entry = serde_json::to_value(Snippet::new("t", "c", Language::Go)).unwrap();
        entry["id"] = serde_json::json!(2);
        fs::write(&path, serde_json::json!({ "1": entry }).to_string()).unwrap();

        let mut repo = JsonRepository::open(&path).unwrap();
        assert_eq!(repo.all().unwrap()[0].id, Some(1));
        assert_eq!(repo.get(1).unwrap().id, Some(1));
        assert_eq!(repo.add(Snippet::new("u", "d", Language::Go)).unwrap().id, 2);
    }
}
