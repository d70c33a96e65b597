//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod logging;
pub mod repository;
pub mod store;

pub use config::Config;
pub use repository::{FileSystemRepository, MemosRepository};
pub use store::{
    Document, DocumentStore, Filter, JsonlDocumentStore, MemoryDocumentStore, StoreError,
};
