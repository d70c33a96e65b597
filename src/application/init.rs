//! Initialize memos directory use case

use crate::error::{MemoError, Result};
use crate::infrastructure::{Config, FileSystemRepository, MemosRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new memo collection at the specified path.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    if repo.is_initialized() {
        return Err(MemoError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }
    repo.initialize()?;

    let config = Config::new();
    repo.save_config(&config)?;

    // Create the empty collection file up front
    repo.open_store(&config)?.close()?;

    info!(root = %path.display(), collection = %config.collection, "initialized memos");
    println!("Initialized memos at {}", path.display());

    Ok(())
}
