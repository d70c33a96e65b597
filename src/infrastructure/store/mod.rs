//! Document store backends
//!
//! A collection holds JSON objects of any shape. Every document carries an
//! `_id` assigned by the store on insert; memo documents are told apart from
//! other kinds by their `type` field.

mod jsonl;
mod memory;

pub use jsonl::JsonlDocumentStore;
pub use memory::MemoryDocumentStore;

use crate::domain::MemoId;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// A stored JSON object
pub type Document = Map<String, Value>;

/// Field holding the store-assigned id
pub const ID_FIELD: &str = "_id";

/// Field holding the document kind
pub const KIND_FIELD: &str = "type";

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {}", .0.display())]
    Unreachable(PathBuf),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt document on line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

/// Conjunction of field equalities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Vec<(String, Value)>,
}

impl Filter {
    /// A filter that matches every document
    pub fn new() -> Self {
        Filter::default()
    }

    /// Documents whose `type` equals `kind`
    pub fn kind(kind: &str) -> Self {
        Filter::new().and_eq(KIND_FIELD, kind)
    }

    /// The document with the given id
    pub fn id(id: &MemoId) -> Self {
        Filter::new().and_eq(ID_FIELD, id.as_str())
    }

    /// Additionally require `field == value`
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Persistence collaborator for memo data
pub trait DocumentStore {
    /// Store a document under a freshly generated id and return that id.
    /// Any `_id` already present on the document is replaced.
    fn insert_one(&mut self, document: Document) -> Result<MemoId, StoreError>;

    /// All documents matching `filter`, in insertion order
    fn find(&self, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Remove the first document matching `filter`; returns 0 or 1
    fn delete_one(&mut self, filter: &Filter) -> Result<usize, StoreError>;
}
