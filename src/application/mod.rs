//! Application layer - Use cases and orchestration

pub mod init;
pub mod list_memos;
pub mod manage_config;
pub mod memo_store;

pub use list_memos::MemoListService;
pub use memo_store::MemoStore;
