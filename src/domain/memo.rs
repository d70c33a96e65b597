//! Memo entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Discriminator stored in every memo document's `type` field
pub const MEMO_KIND: &str = "dated_memo";

/// Opaque handle assigned by the store when a memo is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(String);

impl MemoId {
    /// Generate a fresh, never-before-used id
    pub fn generate() -> Self {
        MemoId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MemoId {
    fn from(value: String) -> Self {
        MemoId(value)
    }
}

impl From<&str> for MemoId {
    fn from(value: &str) -> Self {
        MemoId(value.to_string())
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A text note about a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: MemoId,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub text: String,
}

impl Memo {
    pub fn new(id: MemoId, date: NaiveDate, text: String) -> Self {
        Memo { id, date, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = MemoId::generate();
        let b = MemoId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_memo_serializes_with_canonical_date() {
        let memo = Memo::new(
            MemoId::from("abc"),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Happy New Year".to_string(),
        );
        let json = serde_json::to_value(&memo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "date": "2025-01-01", "text": "Happy New Year"})
        );
    }
}
