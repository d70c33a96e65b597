//! In-process document store

use super::{Document, DocumentStore, Filter, StoreError, ID_FIELD};
use crate::domain::MemoId;
use serde_json::Value;

/// Document store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Vec<Document>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        MemoryDocumentStore::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn insert_one(&mut self, mut document: Document) -> Result<MemoId, StoreError> {
        let id = MemoId::generate();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        self.documents.push(document);
        Ok(id)
    }

    fn find(&self, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    fn delete_one(&mut self, filter: &Filter) -> Result<usize, StoreError> {
        match self.documents.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                self.documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
