use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{Confirmation, SnippetRepository};
use crate::error::{Error, Result};
use crate::model::{Language, Snippet};

const SELECT_COLUMNS: &str = "SELECT id, title, code, description, language, tags, favorite,
    created_at, updated_at FROM snippets";

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            code TEXT NOT NULL,
            description TEXT,
            language TEXT NOT NULL,
            tags TEXT,
            favorite INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Relational store. Open once per command, reuse across all operations.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened sqlite store");
        Ok(SqliteRepository { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SqliteRepository { conn })
    }

    fn exists(&self, id: i64) -> Result<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM snippets WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

impl SnippetRepository for SqliteRepository {
    fn add(&mut self, snippet: Snippet) -> Result<Confirmation> {
        if let Some(id) = snippet.id {
            if self.exists(id)? {
                return Err(Error::SnippetExists(id));
            }
        }

        self.conn.execute(
            "INSERT INTO snippets
                 (id, title, code, description, language, tags, favorite, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                snippet.id,
                snippet.title,
                snippet.code,
                snippet.description,
                snippet.language.as_str(),
                snippet.tags,
                snippet.favorite,
                snippet.created_at,
                snippet.updated_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::info!(id, "added snippet");
        Ok(Confirmation::added(id))
    }

    fn all(&self) -> Result<Vec<Snippet>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let snippets = stmt
            .query_map([], snippet_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(snippets)
    }

    fn get(&self, id: i64) -> Result<Snippet> {
        self.conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], snippet_from_row)
            .optional()?
            .ok_or(Error::SnippetNotFound(id))
    }

    fn delete(&mut self, id: i64) -> Result<Confirmation> {
        let removed = self.conn.execute("DELETE FROM snippets WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(Error::SnippetNotFound(id));
        }

        tracing::info!(id, "deleted snippet");
        Ok(Confirmation::deleted(id))
    }

    fn toggle_favorite(&mut self, id: i64) -> Result<Confirmation> {
        let tx = self.conn.transaction()?;

        let previous: bool = tx
            .query_row("SELECT favorite FROM snippets WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?
            .ok_or(Error::SnippetNotFound(id))?;

        tx.execute(
            "UPDATE snippets SET favorite = ?1, updated_at = ?2 WHERE id = ?3",
            params![!previous, Utc::now(), id],
        )?;
        tx.commit()?;

        tracing::info!(id, favorite = !previous, "toggled favorite");
        Ok(Confirmation::favorite_toggled(id, previous, !previous))
    }

    fn set_tags(&mut self, id: i64, tags: Option<String>) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE snippets SET tags = ?1, updated_at = ?2 WHERE id = ?3",
            params![tags, Utc::now(), id],
        )?;
        if updated == 0 {
            return Err(Error::SnippetNotFound(id));
        }
        Ok(())
    }
}

fn snippet_from_row(row: &rusqlite::Row) -> rusqlite::Result<Snippet> {
    let language_str: String = row.get(4)?;
    let language = language_str.parse::<Language>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Snippet {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
        language,
        tags: row.get(5)?,
        favorite: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
