#![allow(dead_code)]

use snipster::{Language, Snippet};

pub fn snippet_one() -> Snippet {
    Snippet::new("first snippet", "print('hello world')", Language::Python).with_favorite(true)
}

pub fn snippet_two() -> Snippet {
    Snippet::new("second snippet", "print('french bulldogs are awesome')", Language::Python)
        .with_favorite(true)
}

pub fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}
