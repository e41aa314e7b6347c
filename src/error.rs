use thiserror::Error;

/// Every failure a repository, the config loader or the adapters can surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Snippet ID: {0} not found")]
    SnippetNotFound(i64),
    #[error("Snippet ID: {0} already exists")]
    SnippetExists(i64),
    #[error("Tag '{tag}' already exists for Snippet ID: {id}")]
    TagExists { id: i64, tag: String },
    #[error("Tag '{tag}' not found for Snippet ID: {id}")]
    TagNotFound { id: i64, tag: String },
    #[error("Snippet ID: {0} has no tags to remove")]
    NoTagsPresent(i64),
    #[error("No snippet IDs left after {0}")]
    IdsExhausted(i64),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
