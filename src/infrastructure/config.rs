//! Configuration management

use crate::error::{MemoError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-collection metadata directory
pub const MEMOS_DIR: &str = ".memos";

const DEFAULT_COLLECTION: &str = "dated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Collection name; documents live in `.memos/<collection>.jsonl`
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Log at debug level unless RUST_LOG says otherwise
    #[serde(default)]
    pub debug: bool,
    pub created: DateTime<Utc>,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            collection: default_collection(),
            debug: false,
            created: Utc::now(),
        }
    }

    /// Load config from .memos/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(MEMOS_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MemoError::NotMemoDirectory(path.to_path_buf())
            } else {
                MemoError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .memos/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let memos_dir = path.join(MEMOS_DIR);
        let config_path = memos_dir.join("config.toml");

        if !memos_dir.exists() {
            fs::create_dir(&memos_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Path of the collection file under the given root
    pub fn collection_path(&self, root: &Path) -> PathBuf {
        root.join(MEMOS_DIR)
            .join(format!("{}.jsonl", self.collection))
    }

    /// Check that the collection name is usable as a file stem
    pub fn validate(&self) -> Result<()> {
        validate_collection_name(&self.collection)
    }
}

pub fn validate_collection_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(MemoError::Config(format!(
            "Invalid collection name: '{}'. Use letters, digits, '_' or '-'",
            name
        )))
    }
}
