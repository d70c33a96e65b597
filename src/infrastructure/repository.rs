//! File system repository: locates a memos root and the collection in it

use crate::error::{MemoError, Result};
use crate::infrastructure::config::MEMOS_DIR;
use crate::infrastructure::store::JsonlDocumentStore;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that pins the memos root
pub const ROOT_ENV: &str = "MEMOS_ROOT";

/// Abstract repository for memos directory operations
pub trait MemosRepository {
    /// Load configuration from .memos/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .memos/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .memos directory exists
    fn is_initialized(&self) -> bool;

    /// Create .memos directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of MemosRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the memos root.
    /// MEMOS_ROOT wins when set; otherwise walk up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_memos_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MemoError::Config(format!(
                    "{} is set to '{}' but no .memos directory found. \
                    Run 'memos init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the memos root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_memos_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MemoError::NotMemoDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_memos_dir(path: &Path) -> bool {
        path.join(MEMOS_DIR).is_dir()
    }

    /// Open the document collection named by `config`
    pub fn open_store(&self, config: &Config) -> Result<JsonlDocumentStore> {
        let store = JsonlDocumentStore::open(config.collection_path(&self.root))?;
        Ok(store)
    }
}

impl MemosRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_memos_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let memos_dir = self.root.join(MEMOS_DIR);

        if memos_dir.exists() {
            return Err(MemoError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&memos_dir)?;
        Ok(())
    }
}
