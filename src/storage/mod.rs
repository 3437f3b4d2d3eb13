//! Storage module for the persisted catalog document
//!
//! This module owns the on-disk JSON document: loading it with corruption
//! recovery, merging freshly fetched pages into it, and writing it back in
//! full. The document file is a single-writer, last-write-wins artifact
//! with no locking; concurrent runs against the same output file are out
//! of contract.

mod json;
mod merge;

pub use json::JsonStore;
pub use merge::merge_page;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
