//! Config management use case

use crate::error::{MemoError, Result};
use crate::infrastructure::config::validate_collection_name;
use crate::infrastructure::{Config, FileSystemRepository, MemosRepository};

/// Service for managing memos configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "collection" => Ok(config.collection),
            "debug" => Ok(config.debug.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(MemoError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: collection, debug, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "collection" => {
                validate_collection_name(value)?;
                config.collection = value.to_string();
            }
            "debug" => {
                config.debug = value.parse().map_err(|_| {
                    MemoError::Config(format!(
                        "Invalid value for debug: '{}'. Use true or false",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(MemoError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(MemoError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: collection, debug",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();
        ConfigService::new(repo)
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert_eq!(service.get("collection").unwrap(), "dated");
        assert_eq!(service.get("debug").unwrap(), "false");
        assert!(service.get("created").is_ok());
    }

    #[test]
    fn test_set_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("debug", "true").unwrap();
        service.set("collection", "archive").unwrap();

        assert_eq!(service.get("debug").unwrap(), "true");
        assert_eq!(service.get("collection").unwrap(), "archive");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("debug", "maybe").is_err());
        assert!(service.set("collection", "a/b").is_err());
        assert!(service.set("created", "2025-01-01").is_err());
        assert!(service.set("port", "5000").is_err());
        assert!(service.get("port").is_err());
    }
}
