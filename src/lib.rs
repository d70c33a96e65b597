//! memos - Dated memoranda in a document collection
//!
//! Stores memos with free text and a calendar date, lists them newest
//! first with humanized dates ("Today", "Tomorrow", "in 5 days"), and
//! deletes them by id.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MemoError;
