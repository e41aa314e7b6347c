use std::collections::BTreeMap;

use chrono::Utc;

use super::{Confirmation, SnippetRepository};
use crate::error::{Error, Result};
use crate::model::Snippet;

/// Transient store. Also the working state behind [`super::JsonRepository`].
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    snippets: BTreeMap<i64, Snippet>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(snippets: BTreeMap<i64, Snippet>) -> Self {
        MemoryRepository { snippets }
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<i64, Snippet> {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    fn next_id(&self) -> Result<i64> {
        match self.snippets.keys().next_back() {
            None => Ok(1),
            Some(&last) => last.checked_add(1).ok_or(Error::IdsExhausted(last)),
        }
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Snippet> {
        self.snippets.get_mut(&id).ok_or(Error::SnippetNotFound(id))
    }
}

impl SnippetRepository for MemoryRepository {
    fn add(&mut self, mut snippet: Snippet) -> Result<Confirmation> {
        let id = match snippet.id {
            Some(id) if self.snippets.contains_key(&id) => return Err(Error::SnippetExists(id)),
            Some(id) => id,
            None => self.next_id()?,
        };

        snippet.id = Some(id);
        self.snippets.insert(id, snippet);
        tracing::info!(id, "added snippet");
        Ok(Confirmation::added(id))
    }

    fn all(&self) -> Result<Vec<Snippet>> {
        Ok(self.snippets.values().cloned().collect())
    }

    fn get(&self, id: i64) -> Result<Snippet> {
        self.snippets.get(&id).cloned().ok_or(Error::SnippetNotFound(id))
    }

    fn delete(&mut self, id: i64) -> Result<Confirmation> {
        self.snippets.remove(&id).ok_or(Error::SnippetNotFound(id))?;
        tracing::info!(id, "deleted snippet");
        Ok(Confirmation::deleted(id))
    }

    fn toggle_favorite(&mut self, id: i64) -> Result<Confirmation> {
        let snippet = self.get_mut(id)?;
        let previous = snippet.favorite;
        snippet.favorite = !previous;
        snippet.updated_at = Utc::now();
        tracing::info!(id, favorite = !previous, "toggled favorite");
        Ok(Confirmation::favorite_toggled(id, previous, !previous))
    }

    fn set_tags(&mut self, id: i64, tags: Option<String>) -> Result<()> {
        let snippet = self.get_mut(id)?;
        snippet.tags = tags;
        snippet.updated_at = Utc::now();
        Ok(())
    }
}
