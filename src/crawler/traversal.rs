//! Pagination traversal engine
//!
//! Drives repeated listing-page fetches for one category until the source
//! is exhausted. The source does not expose a total page count, and when a
//! page number past the real end is requested it silently serves its last
//! real page again. Termination therefore rests on two signals:
//!
//! 1. An empty page: the catalog is exhausted.
//! 2. A page on which every record has already been seen: the source is
//!    repeating itself, so the previous page was the real end.
//!
//! A source that kept serving fresh records forever would keep this loop
//! running forever; there is no page cap by contract. The optional
//! `max_pages` ceiling exists as a guard against exactly that pathology.

use crate::catalog::Record;
use crate::crawler::fetcher::PageFetcher;
use std::collections::HashSet;
use std::time::Duration;

/// Sequential traversal over every listing page of a category
pub struct Traversal<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    page_delay: Duration,
    max_pages: Option<u32>,
}

impl<'a, F: PageFetcher + ?Sized> Traversal<'a, F> {
    pub fn new(fetcher: &'a F, page_delay: Duration) -> Self {
        Self {
            fetcher,
            page_delay,
            max_pages: None,
        }
    }

    /// Adds a defensive ceiling on the number of pages fetched
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Fetches every page of a category and returns the deduplicated records
    ///
    /// Pages are fetched strictly in order, one at a time, with a fixed
    /// pause between requests; the repeat-detection stop condition depends
    /// on that ordering. Across pages, the first occurrence of a
    /// `source_url` wins and keeps its originally assigned id; later
    /// duplicates are dropped.
    ///
    /// # Arguments
    ///
    /// * `category` - The category (console/section) key to traverse
    ///
    /// # Returns
    ///
    /// Every distinct record of the category, in discovery order
    pub async fn traverse_all(&self, category: &str) -> Vec<Record> {
        let mut collected: Vec<Record> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut page: u32 = 1;

        loop {
            if let Some(max_pages) = self.max_pages {
                if page > max_pages {
                    tracing::warn!(
                        "Reached page ceiling ({}) for '{}'; stopping traversal",
                        max_pages,
                        category
                    );
                    break;
                }
            }

            let batch = self.fetcher.fetch_page(category, page).await;

            if batch.is_empty() {
                tracing::info!("Page {} of '{}' is empty; catalog exhausted", page, category);
                break;
            }

            let returned = batch.len();
            let mut new_count = 0;
            for record in batch {
                if seen.insert(record.source_url.clone()) {
                    new_count += 1;
                    collected.push(record);
                }
            }

            if new_count == 0 {
                // Nothing new on the whole page: the source is serving its
                // last real page again.
                tracing::info!(
                    "Page {} of '{}' repeated already-seen records; stopping",
                    page,
                    category
                );
                break;
            }

            tracing::info!(
                "Page {} of '{}': {} records, {} new, {} total",
                page,
                category,
                returned,
                new_count,
                collected.len()
            );

            tokio::time::sleep(self.page_delay).await;
            page += 1;
        }

        collected
    }
}
