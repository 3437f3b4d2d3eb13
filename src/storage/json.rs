//! JSON-backed catalog document store

use crate::catalog::CatalogDocument;
use crate::storage::StorageResult;
use std::path::{Path, PathBuf};

/// Read-modify-write access to the catalog document file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted document
    ///
    /// A missing file means a first run. An unreadable or unparsable file is
    /// surfaced as a warning and replaced with a fresh empty document; the
    /// corrupt content is overwritten on the next save. Neither case is
    /// fatal.
    pub fn load(&self) -> CatalogDocument {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return CatalogDocument::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read catalog at {}: {}; starting a fresh document",
                    self.path.display(),
                    e
                );
                return CatalogDocument::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "Catalog at {} is not valid JSON ({}); starting a fresh document",
                    self.path.display(),
                    e
                );
                CatalogDocument::new()
            }
        }
    }

    /// Writes the full document back to disk
    ///
    /// Unlike allocator-state persistence, a write failure here propagates:
    /// the document is the run's deliverable and silent loss of fetched
    /// data is not acceptable.
    pub fn save(&self, doc: &CatalogDocument) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
