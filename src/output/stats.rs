//! Statistics over a persisted catalog document

use crate::catalog::CatalogDocument;
use chrono::{DateTime, Utc};

/// Per-category breakdown
#[derive(Debug, Clone)]
pub struct CategoryStats {
    pub name: String,
    pub pages: usize,
    pub records: usize,
    pub last_updated: DateTime<Utc>,
}

/// Catalog-wide statistics summary
#[derive(Debug, Clone)]
pub struct CatalogStatistics {
    pub total_categories: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub categories: Vec<CategoryStats>,
}

/// Derives statistics from a loaded catalog document
pub fn load_statistics(doc: &CatalogDocument) -> CatalogStatistics {
    let categories: Vec<CategoryStats> = doc
        .categories
        .iter()
        .map(|(name, category)| CategoryStats {
            name: name.clone(),
            pages: category.pages.len(),
            records: category.total_records,
            last_updated: category.last_updated,
        })
        .collect();

    CatalogStatistics {
        total_categories: doc.categories.len(),
        total_pages: categories.iter().map(|c| c.pages).sum(),
        total_records: categories.iter().map(|c| c.records).sum(),
        categories,
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CatalogStatistics) {
    println!("=== Catalog Statistics ===\n");

    println!("Overview:");
    println!("  Categories: {}", stats.total_categories);
    println!("  Page entries: {}", stats.total_pages);
    println!("  Records: {}", stats.total_records);
    println!();

    if stats.categories.is_empty() {
        println!("The catalog is empty.");
        return;
    }

    println!("By Category:");
    for category in &stats.categories {
        println!(
            "  {}: {} records across {} page entries (updated {})",
            category.name,
            category.records,
            category.pages,
            category.last_updated.format("%Y-%m-%d %H:%M UTC")
        );
    }
}
