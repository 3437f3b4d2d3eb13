//! Console reporting: end-of-run summaries and catalog statistics

mod stats;

pub use stats::{load_statistics, print_statistics, CatalogStatistics, CategoryStats};

use crate::catalog::PageLabel;
use std::path::PathBuf;

/// What one scrape run accomplished
///
/// A run always ends by reporting these counts, even when individual pages
/// or records failed along the way.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub category: String,
    pub page: PageLabel,
    pub records: usize,
    pub downloads_ok: usize,
    pub downloads_failed: usize,
    pub output: PathBuf,
}

impl RunSummary {
    /// Prints the summary to stdout
    pub fn print(&self) {
        println!("=== Scrape Summary ===\n");
        println!("Category: {}", self.category);
        println!("Page: {}", self.page);
        println!("Records merged: {}", self.records);
        if self.downloads_ok > 0 || self.downloads_failed > 0 {
            println!(
                "Downloads: {} succeeded, {} failed",
                self.downloads_ok, self.downloads_failed
            );
        }
        println!("Catalog: {}", self.output.display());
    }
}
