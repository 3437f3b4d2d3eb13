//! Item records extracted from listing and detail pages

use serde::{Deserialize, Serialize};

/// One catalog item
///
/// A record is created from a listing row with only its core fields set; a
/// later detail fetch may fill in the optional descriptive fields. The
/// `source_url` doubles as the deduplication key, and `id` is assigned
/// exactly once when the record is first extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique sequential identifier, assigned once and never reassigned
    pub id: u64,

    /// Item title as shown on the listing page
    pub title: String,

    /// Category (console/section) key the record belongs to
    pub category: String,

    /// Canonical detail-page URL; doubles as the dedup key
    pub source_url: String,

    /// Download locator; equals `source_url` until a detail fetch refines it
    pub asset_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl Record {
    /// Creates a listing-level record with no detail fields
    pub fn new(id: u64, title: &str, category: &str, source_url: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            category: category.to_string(),
            source_url: source_url.to_string(),
            asset_url: source_url.to_string(),
            image: None,
            rating: None,
            region: None,
            file_size: None,
            version: None,
            related: Vec::new(),
        }
    }

    /// Folds a detail-fetch result into this record
    ///
    /// `id` and `category` are never taken from the detail record; the
    /// listing-assigned identity survives enrichment. Detail fields replace
    /// existing values only when the detail fetch actually produced them.
    pub fn absorb_detail(&mut self, detail: Record) {
        if !detail.title.is_empty() {
            self.title = detail.title;
        }
        // A detail asset_url that still equals its source_url means the
        // detail page exposed no direct download link.
        if !detail.asset_url.is_empty() && detail.asset_url != detail.source_url {
            self.asset_url = detail.asset_url;
        }
        self.image = detail.image.or(self.image.take());
        self.rating = detail.rating.or(self.rating.take());
        self.region = detail.region.or(self.region.take());
        self.file_size = detail.file_size.or(self.file_size.take());
        self.version = detail.version.or(self.version.take());
        if !detail.related.is_empty() {
            self.related = detail.related;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_record() -> Record {
        Record::new(7, "Alpha Quest", "ps2", "https://example.com/item/41")
    }

    #[test]
    fn test_new_record_uses_source_as_asset() {
        let record = listing_record();
        assert_eq!(record.asset_url, record.source_url);
        assert!(record.image.is_none());
    }

    #[test]
    fn test_absorb_detail_keeps_id_and_category() {
        let mut record = listing_record();
        let mut detail = Record::new(99, "Alpha Quest (USA)", "", "https://example.com/item/41");
        detail.asset_url = "https://example.com/dl/41".to_string();
        detail.region = Some("USA".to_string());
        detail.rating = Some(8.5);

        record.absorb_detail(detail);

        assert_eq!(record.id, 7);
        assert_eq!(record.category, "ps2");
        assert_eq!(record.title, "Alpha Quest (USA)");
        assert_eq!(record.asset_url, "https://example.com/dl/41");
        assert_eq!(record.region.as_deref(), Some("USA"));
        assert_eq!(record.rating, Some(8.5));
    }

    #[test]
    fn test_absorb_detail_preserves_existing_when_detail_is_sparse() {
        let mut record = listing_record();
        record.region = Some("EU".to_string());

        let detail = Record::new(100, "", "", "https://example.com/item/41");
        record.absorb_detail(detail);

        assert_eq!(record.title, "Alpha Quest");
        assert_eq!(record.region.as_deref(), Some("EU"));
        // No direct download link on the detail page: asset stays put
        assert_eq!(record.asset_url, "https://example.com/item/41");
    }
}
