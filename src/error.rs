//! Error types for memos

use crate::domain::ParseError;
use crate::infrastructure::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the memos application
#[derive(Debug, Error)]
pub enum MemoError {
    #[error("Not a memos directory: {0}")]
    NotMemoDirectory(PathBuf),

    #[error("Invalid memo: {0}")]
    Validation(#[from] ParseError),

    #[error("No memo at position {position} (list has {len} memos)")]
    InvalidPosition { position: usize, len: usize },

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MemoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MemoError::NotMemoDirectory(_) => 2,
            MemoError::Validation(_) | MemoError::InvalidPosition { .. } => 3,
            MemoError::Persistence(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MemoError::NotMemoDirectory(path) => {
                format!(
                    "Not a memos directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'memos init' in this directory to create a memo collection\n\
                    • Navigate to an existing memos directory\n\
                    • Set MEMOS_ROOT environment variable to your memos path",
                    path.display()
                )
            }
            MemoError::Validation(err) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: MM/DD/YYYY\n\
                    Example: memos create --date 01/01/2025 \"Happy New Year\"",
                    err.input()
                )
            }
            MemoError::InvalidPosition { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Use 'memos list' to see memo positions (they start at 1)\n\
                    • Remove by id instead: memos remove <ID>",
                    self
                )
            }
            MemoError::Persistence(StoreError::Unreachable(path)) => {
                format!(
                    "Memo store unreachable: {}\n\n\
                    Suggestions:\n\
                    • Check that the .memos directory still exists\n\
                    • Run 'memos init' to recreate the collection",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MemoError
pub type Result<T> = std::result::Result<T, MemoError>;
