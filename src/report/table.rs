//! Terminal rendering for snippets.
//!
//! The list view is one row per snippet, sorted by id. The detail view
//! prints every field followed by the code itself.

use crate::model::Snippet;

const TITLE_WIDTH: usize = 30;
const TAGS_WIDTH: usize = 30;

pub fn render(snippets: &[Snippet]) -> String {
    if snippets.is_empty() {
        return String::from("No snippets found.\n");
    }

    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<TITLE_WIDTH$} {:<12} {:<4} {}\n",
        "ID", "Title", "Language", "Fav", "Tags"
    ));
    output.push_str(&"-".repeat(6 + TITLE_WIDTH + 12 + 4 + TAGS_WIDTH + 4));
    output.push('\n');

    for snippet in snippets {
        output.push_str(&format!(
            "{:<6} {:<TITLE_WIDTH$} {:<12} {:<4} {}\n",
            snippet.id.map(|id| id.to_string()).unwrap_or_default(),
            truncate(&snippet.title, TITLE_WIDTH),
            snippet.language.as_str(),
            if snippet.favorite { "*" } else { "" },
            truncate(snippet.tags.as_deref().unwrap_or(""), TAGS_WIDTH),
        ));
    }

    output.push_str(&format!("\n{} snippet(s)\n", snippets.len()));
    output
}

pub fn render_detail(snippet: &Snippet) -> String {
    let mut output = String::new();

    let id = snippet.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    output.push_str(&format!("#{id} {}\n", snippet.title));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    output.push_str(&format!("language:    {}\n", snippet.language));
    if let Some(description) = &snippet.description {
        output.push_str(&format!("description: {description}\n"));
    }
    if let Some(tags) = snippet.tags.as_deref().filter(|t| !t.is_empty()) {
        output.push_str(&format!("tags:        {tags}\n"));
    }
    output.push_str(&format!("favorite:    {}\n", snippet.favorite));
    output.push_str(&format!(
        "created:     {}\n",
        snippet.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!(
        "updated:     {}\n",
        snippet.updated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output.push('\n');
    output.push_str(&snippet.code);
    if !snippet.code.ends_with('\n') {
        output.push('\n');
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
