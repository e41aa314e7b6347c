//! Snippet storage.
//!
//! Every backend implements [`SnippetRepository`]:
//! - memory: transient ordered map
//! - json: the same map loaded from and flushed back to a JSON file
//! - sqlite: one `snippets` table
//!
//! Tag editing lives in the trait's default `tag` method so all three
//! backends enforce the same set rules; backends only store the result.

pub mod json;
pub mod memory;
pub mod sqlite;

use std::fmt;

use crate::config::{Backend, Config};
use crate::error::{Error, Result};
use crate::model::{join_tags, split_tags, Snippet};

pub use json::JsonRepository;
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

/// What a mutating repository call reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub id: i64,
    pub message: String,
}

impl Confirmation {
    fn new(id: i64, message: String) -> Self {
        Confirmation { id, message }
    }

    pub fn added(id: i64) -> Self {
        Confirmation::new(
            id,
            format!("Snippet ID: {id} was created and added to the Snippet Repository"),
        )
    }

    pub fn deleted(id: i64) -> Self {
        Confirmation::new(
            id,
            format!("Snippet ID: {id} was deleted and removed from the Snippet Repository"),
        )
    }

    pub fn favorite_toggled(id: i64, from: bool, to: bool) -> Self {
        Confirmation::new(id, format!("Snippet ID: {id} favorite updated from {from} to {to}"))
    }

    fn tags_added(id: i64, tags: &[String]) -> Self {
        let message = format!("Tags [{}] were added for Snippet ID: {id}", tags.join(", "));
        Confirmation::new(id, message)
    }

    fn tags_removed(id: i64, tags: &[String]) -> Self {
        let message = format!("Tags [{}] were removed from Snippet ID: {id}", tags.join(", "));
        Confirmation::new(id, message)
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub trait SnippetRepository {
    /// Store a snippet. A missing id is assigned by the store.
    fn add(&mut self, snippet: Snippet) -> Result<Confirmation>;

    /// All snippets, ordered by id.
    fn all(&self) -> Result<Vec<Snippet>>;

    fn get(&self, id: i64) -> Result<Snippet>;

    fn delete(&mut self, id: i64) -> Result<Confirmation>;

    fn toggle_favorite(&mut self, id: i64) -> Result<Confirmation>;

    /// Overwrite the raw tag field and bump `updated_at`.
    fn set_tags(&mut self, id: i64, tags: Option<String>) -> Result<()>;

    /// Persist pending state. Only backends that buffer writes need this.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Add `tags` to, or with `remove` take them off, a snippet's tag set.
    fn tag(&mut self, id: i64, tags: &[String], remove: bool) -> Result<Confirmation> {
        let existing = self.get(id)?.tag_list();
        let requested = requested_tags(tags);

        if remove {
            let updated = remove_tags(id, &existing, &requested)?;
            self.set_tags(id, join_tags(&updated))?;
            tracing::info!(id, tags = ?requested, "removed tags");
            Ok(Confirmation::tags_removed(id, &requested))
        } else {
            let updated = add_tags(id, &existing, &requested)?;
            self.set_tags(id, join_tags(&updated))?;
            tracing::info!(id, tags = ?requested, "added tags");
            Ok(Confirmation::tags_added(id, &requested))
        }
    }
}

/// Flatten caller arguments into individual tags, first occurrence wins.
fn requested_tags(tags: &[String]) -> Vec<String> {
    let mut requested: Vec<String> = Vec::new();
    for tag in tags.iter().flat_map(|t| split_tags(Some(t))) {
        if !requested.contains(&tag) {
            requested.push(tag);
        }
    }
    requested
}

fn add_tags(id: i64, existing: &[String], requested: &[String]) -> Result<Vec<String>> {
    if let Some(tag) = requested.iter().find(|t| existing.contains(t)) {
        return Err(Error::TagExists { id, tag: tag.clone() });
    }

    Ok(existing.iter().chain(requested).cloned().collect())
}

fn remove_tags(id: i64, existing: &[String], requested: &[String]) -> Result<Vec<String>> {
    if existing.is_empty() {
        return Err(Error::NoTagsPresent(id));
    }

    if let Some(tag) = requested.iter().find(|t| !existing.contains(t)) {
        return Err(Error::TagNotFound { id, tag: tag.clone() });
    }

    Ok(existing
        .iter()
        .filter(|t| !requested.contains(t))
        .cloned()
        .collect())
}

/// Open the backend the config selects.
pub fn open_repository(config: &Config) -> Result<Box<dyn SnippetRepository + Send>> {
    let repo: Box<dyn SnippetRepository + Send> = match config.backend {
        Backend::Sqlite => Box::new(SqliteRepository::open(&config.database)?),
        Backend::Json => Box::new(JsonRepository::open(&config.json_path)?),
        Backend::Memory => Box::new(MemoryRepository::new()),
    };
    tracing::debug!(backend = ?config.backend, "opened snippet repository");
    Ok(repo)
}

impl<R: SnippetRepository + ?Sized> SnippetRepository for Box<R> {
    fn add(&mut self, snippet: Snippet) -> Result<Confirmation> {
        (**self).add(snippet)
    }

    fn all(&self) -> Result<Vec<Snippet>> {
        (**self).all()
    }

    fn get(&self, id: i64) -> Result<Snippet> {
        (**self).get(id)
    }

    fn delete(&mut self, id: i64) -> Result<Confirmation> {
        (**self).delete(id)
    }

    fn toggle_favorite(&mut self, id: i64) -> Result<Confirmation> {
        (**self).toggle_favorite(id)
    }

    fn set_tags(&mut self, id: i64, tags: Option<String>) -> Result<()> {
        (**self).set_tags(id, tags)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn tag(&mut self, id: i64, tags: &[String], remove: bool) -> Result<Confirmation> {
        (**self).tag(id, tags, remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn requested_tags_split_and_dedupe() {
        let requested = requested_tags(&tags(&["python, print", "win", "print"]));
        assert_eq!(requested, tags(&["python", "print", "win"]));
    }

    #[test]
    fn add_appends_after_existing() {
        let updated = add_tags(1, &tags(&["python"]), &tags(&["json", "sql"])).unwrap();
        assert_eq!(updated, tags(&["python", "json", "sql"]));
    }

    #[test]
    fn add_rejects_overlap() {
        let err = add_tags(1, &tags(&["python", "json"]), &tags(&["sql", "json"])).unwrap_err();
        assert!(matches!(err, Error::TagExists { id: 1, ref tag } if tag == "json"));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let updated = remove_tags(1, &tags(&["a", "b", "c"]), &tags(&["b"])).unwrap();
        assert_eq!(updated, tags(&["a", "c"]));
    }

    #[test]
    fn remove_from_empty_set() {
        let err = remove_tags(7, &[], &tags(&["a"])).unwrap_err();
        assert!(matches!(err, Error::NoTagsPresent(7)));
    }

    #[test]
    fn remove_missing_tag() {
        let err = remove_tags(3, &tags(&["a"]), &tags(&["a", "z"])).unwrap_err();
        assert!(matches!(err, Error::TagNotFound { id: 3, ref tag } if tag == "z"));
    }

    #[test]
    fn confirmation_messages() {
        assert_eq!(
            Confirmation::added(1).to_string(),
            "Snippet ID: 1 was created and added to the Snippet Repository"
        );
        assert_eq!(
            Confirmation::favorite_toggled(2, true, false).message,
            "Snippet ID: 2 favorite updated from true to false"
        );
        assert_eq!(
            Confirmation::tags_added(1, &tags(&["json", "sql"])).message,
            "Tags [json, sql] were added for Snippet ID: 1"
        );
    }
}
