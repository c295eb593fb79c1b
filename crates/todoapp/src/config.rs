//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from
//! a TOML file and environment variables on top of compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TODO_HOST`, `TODO_PORT`, `TODO_BACKEND`, ...
//! 2. **Config file**: `todo.toml` in the OS config directory (via `directories`),
//!    or the path given with `--config`. A missing file is not an error.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! The CLI applies its own flags on top of the loaded value.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `host` | `127.0.0.1` | Address the server binds to |
//! | `port` | `3000` | Port the server binds to |
//! | `backend` | `file` | `file` or `collection` |
//! | `data_file` | `<data dir>/todos.json` | JSON array used by the file backend |
//! | `api_url` | `http://localhost:3000/api` | Base URL used by the networked client |
//! | `local_dir` | `<data dir>/local` | Storage directory of the local-only client |

use crate::error::{Result, TodoError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "todo.toml";
pub const DATA_FILENAME: &str = "todos.json";

/// Which persistence adapter the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    File,
    Collection,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::Collection => "collection",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "collection" => Ok(Backend::Collection),
            other => Err(format!(
                "unknown backend '{}', expected 'file' or 'collection'",
                other
            )),
        }
    }
}

// Parsed through a plain string so env vars and TOML values share one path.
impl<'de> Deserialize<'de> for Backend {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Backend {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Configuration for the todo server and clients, stored in `todo.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Address the HTTP server binds to
    #[config(env = "TODO_HOST", default = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP server binds to
    #[config(env = "TODO_PORT", default = 3000)]
    pub port: u16,

    /// Persistence adapter: "file" or "collection"
    #[config(env = "TODO_BACKEND", default = "file")]
    pub backend: Backend,

    /// JSON file used by the file backend.
    /// When absent, defaults to `todos.json` in the user data directory.
    #[config(env = "TODO_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Base URL of the REST API, used by the networked client
    #[config(env = "TODO_API_URL", default = "http://localhost:3000/api")]
    pub api_url: String,

    /// Directory backing the local-only client's key/value storage.
    #[config(env = "TODO_LOCAL_DIR")]
    pub local_dir: Option<PathBuf>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            backend: Backend::File,
            data_file: None,
            api_url: "http://localhost:3000/api".to_string(),
            local_dir: None,
        }
    }
}

impl TodoConfig {
    /// Load config from `file` (or the default location), the environment and defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let path = file.map(Path::to_path_buf).or_else(default_config_file);

        let mut builder = Self::builder().env();
        if let Some(path) = &path {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| TodoError::Config(e.to_string()))
    }

    /// Path of the file backend's JSON array.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join(DATA_FILENAME))
    }

    /// Directory of the local-only client's storage.
    pub fn local_dir(&self) -> PathBuf {
        self.local_dir
            .clone()
            .unwrap_or_else(|| default_data_dir().join("local"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "todo", "todo")
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}
