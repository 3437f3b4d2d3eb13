//! HTML record extraction for listing and detail pages
//!
//! Extraction is best-effort by design: the source exposes no API, so
//! records are pulled out of its markup with tolerant heuristics. A page
//! that matches nothing yields an empty result, never an error, and any
//! subset of detail fields may be absent.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// A record candidate parsed from one listing row, before id assignment
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    pub title: String,
    pub source_url: String,
}

/// Optional fields parsed from a detail page
#[derive(Debug, Clone, Default)]
pub struct DetailFields {
    pub title: Option<String>,
    pub asset_url: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub region: Option<String>,
    pub file_size: Option<String>,
    pub version: Option<String>,
    pub related: Vec<String>,
}

/// Extracts record candidates from a listing page
///
/// The supported listing shape is a results table: one item per row, with
/// the item's detail link as the row's first titled anchor. Rows without a
/// usable anchor are skipped. Duplicate detail URLs within the page are
/// dropped, so the returned sequence is already page-local deduplicated.
pub fn parse_listing_page(html: &str, base_url: &Url) -> Vec<ListingItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();
    let mut seen = HashSet::new();

    let row_selector = match Selector::parse("tr") {
        Ok(selector) => selector,
        Err(_) => return items,
    };
    let link_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return items,
    };

    for row in document.select(&row_selector) {
        let item = row.select(&link_selector).find_map(|link| {
            let title = element_text(&link);
            if title.is_empty() {
                return None;
            }
            let href = link.value().attr("href")?;
            let source_url = resolve_link(href, base_url)?;
            Some(ListingItem { title, source_url })
        });

        if let Some(item) = item {
            if seen.insert(item.source_url.clone()) {
                items.push(item);
            }
        }
    }

    items
}

/// Extracts optional descriptive fields from a detail page
///
/// Fields are located by scanning labeled table rows (label cell followed by
/// a value cell), plus a handful of page-level probes for the title, cover
/// image, download link, and related-item list. Whatever cannot be found is
/// simply left unset.
pub fn parse_detail_page(html: &str, base_url: &Url) -> DetailFields {
    let document = Html::parse_document(html);
    let mut fields = DetailFields {
        title: first_text(&document, "h1"),
        ..DetailFields::default()
    };

    if fields.title.is_none() {
        fields.title = first_text(&document, "title");
    }

    // Cover image
    if let Ok(selector) = Selector::parse("img[class*='cover'][src], img[id*='cover'][src]") {
        fields.image = document
            .select(&selector)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| resolve_link(src, base_url));
    }

    // Labeled rows: "Region | USA", "File size | 1.2 GB", ...
    if let (Ok(row_selector), Ok(cell_selector)) =
        (Selector::parse("tr"), Selector::parse("td, th"))
    {
        for row in document.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| element_text(&cell))
                .collect();
            if cells.len() < 2 {
                continue;
            }

            let label = cells[0].trim_end_matches(':').to_lowercase();
            let value = cells[1].clone();
            if value.is_empty() {
                continue;
            }

            if label == "region" {
                fields.region = Some(value);
            } else if label == "version" {
                fields.version = Some(value);
            } else if label.contains("size") {
                fields.file_size = Some(value);
            } else if label.contains("rating") {
                fields.rating = parse_rating(&value);
            }
        }
    }

    // Direct download link
    if let Ok(selector) = Selector::parse("a[href]") {
        fields.asset_url = document.select(&selector).find_map(|link| {
            let href = link.value().attr("href")?;
            let text = element_text(&link).to_lowercase();
            if text.contains("download") || href.to_lowercase().contains("download") {
                resolve_link(href, base_url)
            } else {
                None
            }
        });
    }

    // Related items
    if let Ok(selector) = Selector::parse("[class*='related'] a[href]") {
        fields.related = document
            .select(&selector)
            .map(|link| element_text(&link))
            .filter(|text| !text.is_empty())
            .collect();
    }

    fields
}

/// Collapsed, trimmed text content of an element
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First matching element's text, if any
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
}

/// Parses a rating value like "8.53" or "8.53 (412 votes)"
fn parse_rating(value: &str) -> Option<f32> {
    value.split_whitespace().next()?.parse().ok()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for links that cannot be catalog content:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only links
/// - anything that resolves to a non-HTTP(S) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
