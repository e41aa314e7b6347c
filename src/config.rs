//! Runtime configuration.
//!
//! Built in layers, later ones win: defaults, the TOML file
//! (`~/.config/snipster/config.toml` or `--config`), the `DATABASE_URL`
//! environment variable, then command line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::cli::GlobalArgs;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Json,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub database: PathBuf,
    pub json_path: PathBuf,
    pub bind: SocketAddr,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    backend: Option<Backend>,
    database: Option<PathBuf>,
    json_path: Option<PathBuf>,
    bind: Option<SocketAddr>,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "snipster")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `sqlite:///abs/path`, `sqlite://rel/path` and bare paths all name a file.
fn database_path_from_url(url: &str) -> PathBuf {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    PathBuf::from(path)
}

impl Default for Config {
    fn default() -> Self {
        let data = data_dir();
        Config {
            backend: Backend::Sqlite,
            database: data.join("snipster.db"),
            json_path: data.join("snipster.json"),
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl Config {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let mut config = Config::default();

        match args.config.as_deref() {
            Some(path) => config.apply_file(&read_file(path)?),
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    config.apply_file(&read_file(&path)?);
                }
            }
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.database = database_path_from_url(&url);
            }
        }

        if let Some(backend) = args.backend {
            config.backend = backend;
        }
        if let Some(database) = &args.database {
            match config.backend {
                Backend::Json => config.json_path = database.clone(),
                _ => config.database = database.clone(),
            }
        }

        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn apply_file(&mut self, file: &FileConfig) {
        if let Some(backend) = file.backend {
            self.backend = backend;
        }
        if let Some(database) = &file.database {
            self.database = database.clone();
        }
        if let Some(json_path) = &file.json_path {
            self.json_path = json_path.clone();
        }
        if let Some(bind) = file.bind {
            self.bind = bind;
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("could not read {}: {e}", path.display())))?;
    toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn from_toml(text: &str) -> Result<Config> {
        let file: FileConfig = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        let mut config = Config::default();
        config.apply_file(&file);
        Ok(config)
    }

    fn args(config: &Path) -> GlobalArgs {
        GlobalArgs {
            config: Some(config.to_path_buf()),
            backend: None,
            database: None,
            verbose: false,
        }
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = from_toml(
            r#"
            backend = "json"
            json_path = "/tmp/snippets.json"
            bind = "0.0.0.0:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Json);
        assert_eq!(config.json_path, PathBuf::from("/tmp/snippets.json"));
        assert_eq!(config.bind.port(), 9000);
        assert!(config.database.ends_with("snipster.db"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(from_toml("colour = \"blue\""), Err(Error::Config(_))));
    }

    #[test]
    fn database_urls() {
        assert_eq!(
            database_path_from_url("sqlite:///var/db/s.db"),
            PathBuf::from("/var/db/s.db")
        );
        assert_eq!(database_path_from_url("sqlite://s.db"), PathBuf::from("s.db"));
        assert_eq!(database_path_from_url("plain.db"), PathBuf::from("plain.db"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let args = args(Path::new("/nonexistent/snipster.toml"));
        assert!(matches!(Config::load(&args), Err(Error::Config(_))));
    }

    // the only test in this crate that touches DATABASE_URL
    #[test]
    fn load_layers_file_then_env_then_flags() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "database = \"/from/file.db\"\n").unwrap();

        std::env::remove_var("DATABASE_URL");
        let from_file = Config::load(&args(&file));

        std::env::set_var("DATABASE_URL", "sqlite:///from/env.db");
        let from_env = Config::load(&args(&file));

        let mut flagged = args(&file);
        flagged.database = Some(PathBuf::from("/from/flag.db"));
        let from_flag = Config::load(&flagged);

        std::env::set_var("DATABASE_URL", "");
        let blank_env = Config::load(&args(&file));
        std::env::remove_var("DATABASE_URL");

        assert_eq!(from_file.unwrap().database, PathBuf::from("/from/file.db"));
        assert_eq!(from_env.unwrap().database, PathBuf::from("/from/env.db"));
        assert_eq!(from_flag.unwrap().database, PathBuf::from("/from/flag.db"));
        assert_eq!(blank_env.unwrap().database, PathBuf::from("/from/file.db"));
    }
}
