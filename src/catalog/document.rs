//! Persisted document shapes: page entries, categories, and the root catalog

use crate::catalog::{PageLabel, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One fetched page's worth of records for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page label this entry was fetched under
    pub page: PageLabel,

    /// Number of records in `records`
    pub record_count: usize,

    /// When this entry was fetched
    pub fetched_at: DateTime<Utc>,

    /// Records in discovery order
    pub records: Vec<Record>,
}

impl PageEntry {
    /// Builds an entry stamped with the current time
    pub fn new(page: PageLabel, records: Vec<Record>) -> Self {
        Self {
            page,
            record_count: records.len(),
            fetched_at: Utc::now(),
            records,
        }
    }
}

/// Aggregate of all fetched pages for one category
///
/// Created on the first fetch for a category and mutated on every later
/// fetch; the scraper never deletes a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDocument {
    /// Page entries, kept sorted: numeric labels ascending, "all" last
    pub pages: Vec<PageEntry>,

    /// Count of numeric-labeled entries
    pub total_pages: usize,

    /// Sum of `record_count` over all entries
    pub total_records: usize,

    pub last_updated: DateTime<Utc>,
}

impl CategoryDocument {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            total_pages: 0,
            total_records: 0,
            last_updated: Utc::now(),
        }
    }

    /// Looks up the entry for a page label, if one has been fetched
    pub fn page(&self, label: PageLabel) -> Option<&PageEntry> {
        self.pages.iter().find(|entry| entry.page == label)
    }
}

impl Default for CategoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Root persisted artifact: every scraped category in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Categories keyed by category (console/section) identifier
    pub categories: BTreeMap<String, CategoryDocument>,

    pub total_categories: usize,

    pub last_updated: DateTime<Utc>,
}

impl CatalogDocument {
    pub fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
            total_categories: 0,
            last_updated: Utc::now(),
        }
    }
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self::new()
    }
}
