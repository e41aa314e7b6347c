pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod ui;

pub use error::{Error, Result};
pub use model::{Language, NewSnippet, Snippet};
pub use repo::{Confirmation, SnippetRepository};
