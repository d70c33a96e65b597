//! JSON-lines document store
//!
//! One document per line. Inserts append a line; deletes rewrite the file
//! through a temp file in the same directory and rename it into place.

use super::{Document, DocumentStore, Filter, StoreError, ID_FIELD};
use crate::domain::MemoId;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File-backed document collection
#[derive(Debug)]
pub struct JsonlDocumentStore {
    path: PathBuf,
    file: File,
}

impl JsonlDocumentStore {
    /// Open the collection at `path`, creating an empty one if absent.
    ///
    /// The containing directory must already exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(StoreError::Unreachable(path));
            }
        }

        let file = Self::open_append(&path)?;
        debug!(path = %path.display(), "opened document store");
        Ok(JsonlDocumentStore { path, file })
    }

    /// Flush the collection to disk and release it
    pub fn close(self) -> Result<(), StoreError> {
        self.file.sync_all()?;
        debug!(path = %self.path.display(), "closed document store");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open for appending. A last line left unterminated by another writer
    /// gets its newline here so the next insert starts on a line of its own.
    fn open_append(path: &Path) -> Result<File, StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
                debug!(path = %path.display(), "terminated unfinished last line");
            }
        }

        Ok(file)
    }

    fn read_documents(&self) -> Result<Vec<Document>, StoreError> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::Unreachable(self.path.clone())
            } else {
                StoreError::Io(e)
            }
        })?;

        let mut documents = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line).map_err(|e| StoreError::Corrupt {
                line: index + 1,
                reason: e.to_string(),
            })?;
            match value {
                Value::Object(document) => documents.push(document),
                _ => {
                    return Err(StoreError::Corrupt {
                        line: index + 1,
                        reason: "not a JSON object".to_string(),
                    })
                }
            }
        }

        Ok(documents)
    }

    /// Replace the collection contents with `documents`
    fn rewrite(&mut self, documents: &[Document]) -> Result<(), StoreError> {
        let tmp_name = format!(
            "{}.memos-tmp-{}",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("collection.jsonl"),
            std::process::id()
        );
        let tmp_path = self.path.with_file_name(tmp_name);

        let replaced = Self::write_all_documents(&tmp_path, documents)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(StoreError::from));
        if let Err(e) = replaced {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!(path = %tmp_path.display(), "could not remove temp file: {}", cleanup);
            }
            return Err(e);
        }

        self.file = Self::open_append(&self.path)?;
        Ok(())
    }

    fn write_all_documents(path: &Path, documents: &[Document]) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for document in documents {
            serde_json::to_writer(&mut writer, document)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl DocumentStore for JsonlDocumentStore {
    fn insert_one(&mut self, mut document: Document) -> Result<MemoId, StoreError> {
        let id = MemoId::generate();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        // Document and newline go out in a single write
        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.flush()?;

        trace!(id = %id, "inserted document");
        Ok(id)
    }

    fn find(&self, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let mut documents = self.read_documents()?;
        documents.retain(|doc| filter.matches(doc));
        Ok(documents)
    }

    fn delete_one(&mut self, filter: &Filter) -> Result<usize, StoreError> {
        let mut documents = self.read_documents()?;

        let Some(index) = documents.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };

        let removed = documents.remove(index);
        self.rewrite(&documents)?;

        trace!(id = ?removed.get(ID_FIELD), "deleted document");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn open_in(temp: &TempDir) -> JsonlDocumentStore {
        JsonlDocumentStore::open(temp.path().join("dated.jsonl")).unwrap()
    }

    #[test]
    fn test_open_creates_empty_collection() {
        let temp = TempDir::new().unwrap();
        let store = open_in(&temp);

        assert!(temp.path().join("dated.jsonl").exists());
        assert!(store.find(&Filter::new()).unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_directory_is_unreachable() {
        let temp = TempDir::new().unwrap();
        let result = JsonlDocumentStore::open(temp.path().join("missing").join("dated.jsonl"));

        match result.unwrap_err() {
            StoreError::Unreachable(_) => {}
            other => panic!("Expected Unreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_appends_one_line_per_document() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);

        let first = store.insert_one(doc(json!({"type": "dated_memo", "text": "a"}))).unwrap();
        let second = store.insert_one(doc(json!({"type": "todo", "text": "b"}))).unwrap();
        assert_ne!(first, second);

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains(first.as_str()));
    }

    #[test]
    fn test_insert_replaces_caller_id() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);

        let id = store.insert_one(doc(json!({"_id": "mine", "text": "x"}))).unwrap();
        assert_ne!(id.as_str(), "mine");
        assert!(store.find(&Filter::new().and_eq("_id", "mine")).unwrap().is_empty());
    }

    #[test]
    fn test_find_preserves_insertion_order() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);

        for text in ["one", "two", "three"] {
            store.insert_one(doc(json!({"type": "dated_memo", "text": text}))).unwrap();
        }
        store.insert_one(doc(json!({"type": "todo", "text": "other"}))).unwrap();

        let found = store.find(&Filter::kind("dated_memo")).unwrap();
        let texts: Vec<&str> = found.iter().map(|d| d["text"].as_str().unwrap()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_delete_one_removes_only_match() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);

        let keep = store.insert_one(doc(json!({"text": "keep"}))).unwrap();
        let gone = store.insert_one(doc(json!({"text": "gone"}))).unwrap();

        assert_eq!(store.delete_one(&Filter::id(&gone)).unwrap(), 1);
        assert_eq!(store.delete_one(&Filter::id(&gone)).unwrap(), 0);

        let remaining = store.find(&Filter::new()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["_id"], Value::from(keep.as_str()));
    }

    #[test]
    fn test_insert_after_delete_still_appends() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);

        let first = store.insert_one(doc(json!({"text": "first"}))).unwrap();
        store.delete_one(&Filter::id(&first)).unwrap();
        store.insert_one(doc(json!({"text": "second"}))).unwrap();

        let found = store.find(&Filter::new()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["text"], "second");
    }

    #[test]
    fn test_reopen_sees_previous_documents() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp);
        let id = store.insert_one(doc(json!({"text": "persisted"}))).unwrap();
        store.close().unwrap();

        let reopened = open_in(&temp);
        let found = reopened.find(&Filter::id(&id)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["text"], "persisted");
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dated.jsonl");
        fs::write(&path, "{\"text\": \"ok\"}\n\nnot json\n").unwrap();

        let store = JsonlDocumentStore::open(&path).unwrap();
        match store.find(&Filter::new()).unwrap_err() {
            StoreError::Corrupt { line, .. } => assert_eq!(line, 3),
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_line_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dated.jsonl");
        fs::write(&path, "[1, 2]\n").unwrap();

        let store = JsonlDocumentStore::open(&path).unwrap();
        assert!(matches!(
            store.find(&Filter::new()),
            Err(StoreError::Corrupt { line: 1, .. })
        ));
    }

    #[test]
    fn test_insert_after_unterminated_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dated.jsonl");
        fs::write(&path, r#"{"_id":"t1","type":"todo","text":"external"}"#).unwrap();

        let mut store = JsonlDocumentStore::open(&path).unwrap();
        let id = store.insert_one(doc(json!({"type": "dated_memo", "text": "mine"}))).unwrap();

        let found = store.find(&Filter::new()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["_id"], "t1");
        assert_eq!(found[1]["_id"], Value::from(id.as_str()));

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_open_leaves_terminated_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dated.jsonl");
        fs::write(&path, "{\"text\": \"ok\"}\n").unwrap();

        JsonlDocumentStore::open(&path).unwrap().close().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"text\": \"ok\"}\n");
    }

    #[test]
    fn test_failed_rewrite_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dated.jsonl");
        let mut store = JsonlDocumentStore::open(&path).unwrap();

        // A non-empty directory in place of the collection makes the rename fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        assert!(store.rewrite(&[doc(json!({"text": "x"}))]).is_err());

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.contains(".memos-tmp-"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    }

    #[test]
    fn test_removed_file_is_unreachable() {
        let temp = TempDir::new().unwrap();
        let store = open_in(&temp);
        fs::remove_file(store.path()).unwrap();

        assert!(matches!(
            store.find(&Filter::new()),
            Err(StoreError::Unreachable(_))
        ));
    }
}
