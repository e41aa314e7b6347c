use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::Backend;
use crate::model::Language;

#[derive(Parser)]
#[command(name = "snipster")]
#[command(about = "A personal code snippet manager")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (defaults to ~/.config/snipster/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Database file, or the JSON store file with --backend json
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new snippet
    Add(AddArgs),

    /// List every snippet
    All(AllArgs),

    /// Show one snippet
    Get(GetArgs),

    /// Delete a snippet
    Delete(IdArgs),

    /// Mark or unmark a snippet as favorite
    Favorite(IdArgs),

    /// Add or remove tags on a snippet
    Tag(TagArgs),

    /// Run the HTTP API and browser UI
    Serve(ServeArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// Snippet title
    #[arg(long)]
    pub title: String,

    /// Code snippet
    #[arg(long)]
    pub code: String,

    /// Verbose summary or notes about the snippet
    #[arg(long)]
    pub description: Option<String>,

    /// Programming language used
    #[arg(long)]
    pub language: Language,

    /// Short, descriptive labels used to group snippets, comma separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Mark this snippet as a favorite
    #[arg(long, default_value_t = false)]
    pub favorite: bool,
}

#[derive(Parser)]
pub struct AllArgs {
    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct GetArgs {
    /// Snippet ID to fetch
    #[arg(long)]
    pub id: i64,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct IdArgs {
    /// Snippet ID
    #[arg(long)]
    pub id: i64,
}

#[derive(Parser)]
pub struct TagArgs {
    /// Snippet ID to tag
    #[arg(long)]
    pub id: i64,

    /// Comma-separated list of tags
    #[arg(long, value_delimiter = ',', required = true)]
    pub tags: Vec<String>,

    /// Remove the tags instead of adding them
    #[arg(long, default_value_t = false)]
    pub remove: bool,
}

/// `--tags` values with the whitespace around each comma stripped,
/// blanks and repeats dropped
fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !cleaned.iter().any(|seen| seen == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

impl AddArgs {
    pub fn tag_list(&self) -> Vec<String> {
        clean_tags(&self.tags)
    }
}

impl TagArgs {
    pub fn tag_list(&self) -> Vec<String> {
        clean_tags(&self.tags)
    }
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_flag_splits_on_commas() {
        let cli = Cli::parse_from([
            "snipster", "tag", "--id", "1", "--tags", "python, print,win",
        ]);
        let Command::Tag(args) = cli.command else { panic!("expected tag") };
        assert_eq!(args.tag_list(), vec!["python", "print", "win"]);
        assert!(!args.remove);
    }

    #[test]
    fn add_and_tag_read_tags_the_same_way() {
        let cli = Cli::parse_from([
            "snipster", "add", "--title", "t", "--code", "c", "--language", "rust",
            "--tags", "python,print, win,,print",
        ]);
        let Command::Add(args) = cli.command else { panic!("expected add") };
        assert_eq!(args.tag_list(), vec!["python", "print", "win"]);

        let cli = Cli::parse_from([
            "snipster", "add", "--title", "t", "--code", "c", "--language", "go",
        ]);
        let Command::Add(args) = cli.command else { panic!("expected add") };
        assert!(args.tag_list().is_empty());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let result = Cli::try_parse_from([
            "snipster", "add", "--title", "t", "--code", "c", "--language", "coffeescript",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["snipster", "all", "--backend", "memory"]);
        assert_eq!(cli.global.backend, Some(Backend::Memory));
    }
}
