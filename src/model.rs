//! Snippet entity and the language enum it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Rust,
    Go,
    Typescript,
    Sql,
    Plsql,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Python,
        Language::Javascript,
        Language::Rust,
        Language::Go,
        Language::Typescript,
        Language::Sql,
        Language::Plsql,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Typescript => "typescript",
            Language::Sql => "sql",
            Language::Plsql => "plsql",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Language must be {}", Language::ALL.map(|l| l.as_str()).join(", "))]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// A stored code sample. `tags` is a single `", "`-joined field, not a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Option<i64>,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub language: Language,
    pub tags: Option<String>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(title: impl Into<String>, code: impl Into<String>, language: Language) -> Self {
        let now = Utc::now();
        Snippet {
            id: None,
            title: title.into(),
            code: code.into(),
            description: None,
            language,
            tags: None,
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Logical tag set: the tag field split on `", "`, empty when unset.
    pub fn tag_list(&self) -> Vec<String> {
        split_tags(self.tags.as_deref())
    }
}

/// Create payload accepted by the API; ids and timestamps are generated.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub language: Language,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl From<NewSnippet> for Snippet {
    fn from(new: NewSnippet) -> Self {
        let mut snippet =
            Snippet::new(new.title, new.code, new.language).with_favorite(new.favorite);
        snippet.description = new.description;
        snippet.tags = new.tags;
        snippet
    }
}

pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    match tags {
        Some(text) if !text.is_empty() => text.split(", ").map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Inverse of [`split_tags`]; an empty list is stored as no tags at all.
pub fn join_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(", "))
    }
}
