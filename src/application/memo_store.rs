//! Memo CRUD over a document store

use crate::domain::{canonical, parse_canonical, parse_user_date, Memo, MemoId, MEMO_KIND};
use crate::error::Result;
use crate::infrastructure::store::{ID_FIELD, KIND_FIELD};
use crate::infrastructure::{Document, DocumentStore, Filter};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

const DATE_FIELD: &str = "date";
const TEXT_FIELD: &str = "text";

/// Create, list and delete memos in a collection that may also hold
/// documents of other kinds
pub struct MemoStore<S> {
    store: S,
}

impl<S: DocumentStore> MemoStore<S> {
    /// Wrap an already opened document store
    pub fn new(store: S) -> Self {
        MemoStore { store }
    }

    /// Give the document store back, e.g. to close it
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Normalize `date_input` (`MM/DD/YYYY`) and store a new memo.
    /// Nothing is written when the date is rejected.
    pub fn create(&mut self, text: &str, date_input: &str) -> Result<MemoId> {
        let date = parse_user_date(date_input)?;

        let mut document = Document::new();
        document.insert(KIND_FIELD.to_string(), Value::from(MEMO_KIND));
        document.insert(DATE_FIELD.to_string(), Value::from(canonical(date)));
        document.insert(TEXT_FIELD.to_string(), Value::from(text));

        let id = self.store.insert_one(document)?;
        info!(id = %id, date = %date, "created memo");
        Ok(id)
    }

    /// Snapshot of every memo in store order
    pub fn list_all(&self) -> Result<Vec<Memo>> {
        let documents = self.store.find(&Filter::kind(MEMO_KIND))?;

        let memos: Vec<Memo> = documents
            .iter()
            .filter_map(|document| match memo_from_document(document) {
                Ok(memo) => Some(memo),
                Err(reason) => {
                    warn!(id = ?document.get(ID_FIELD), "skipping unreadable memo: {}", reason);
                    None
                }
            })
            .collect();

        debug!(count = memos.len(), "listed memos");
        Ok(memos)
    }

    /// Delete the given memos and return how many were actually removed.
    ///
    /// Ids that are unknown, repeated, or name a document of another kind
    /// are skipped without error.
    pub fn delete_many(&mut self, ids: &[MemoId]) -> Result<usize> {
        let mut seen = HashSet::new();
        let mut removed = 0;

        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            let filter = Filter::id(id).and_eq(KIND_FIELD, MEMO_KIND);
            let count = self.store.delete_one(&filter)?;
            if count == 0 {
                debug!(id = %id, "memo already absent");
            }
            removed += count;
        }

        info!(requested = ids.len(), removed, "deleted memos");
        Ok(removed)
    }
}

fn memo_from_document(document: &Document) -> std::result::Result<Memo, String> {
    let id = document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or("missing id")?;
    let date = document
        .get(DATE_FIELD)
        .and_then(Value::as_str)
        .ok_or("missing date")?;
    let date = parse_canonical(date).map_err(|e| e.to_string())?;
    let text = document
        .get(TEXT_FIELD)
        .and_then(Value::as_str)
        .ok_or("missing text")?;

    Ok(Memo::new(MemoId::from(id), date, text.to_string()))
}
