//! Merge engine: folds freshly fetched pages into the catalog document

use crate::catalog::{CatalogDocument, CategoryDocument, PageEntry, PageLabel, Record};
use chrono::Utc;

/// Merges one fetched page into the document
///
/// The target category is created on first contact. If the category already
/// holds an entry under the same label, the new entry replaces it wholesale;
/// later fetches of a page fully supersede earlier ones, including any
/// detail fields the earlier fetch may have carried. Aggregate counters are
/// recomputed from scratch rather than incremented, so a merge after a
/// replace cannot drift.
pub fn merge_page(
    doc: &mut CatalogDocument,
    category: &str,
    label: PageLabel,
    records: Vec<Record>,
) {
    let entry = PageEntry::new(label, records);

    let cat = doc
        .categories
        .entry(category.to_string())
        .or_insert_with(CategoryDocument::new);

    match cat.pages.iter().position(|page| page.page == label) {
        Some(index) => cat.pages[index] = entry,
        None => cat.pages.push(entry),
    }

    // Numeric labels ascending, "all" last
    cat.pages.sort_by(|a, b| a.page.cmp(&b.page));

    cat.total_pages = cat.pages.iter().filter(|page| page.page.is_numeric()).count();
    cat.total_records = cat.pages.iter().map(|page| page.record_count).sum();
    cat.last_updated = Utc::now();

    doc.total_categories = doc.categories.len();
    doc.last_updated = Utc::now();
}
