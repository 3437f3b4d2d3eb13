//! Page fetch adapter: turns listing and detail pages into records
//!
//! The fetcher is the boundary between HTTP and the traversal engine. Every
//! failure below this boundary (network error, bad status, unparsable body)
//! degrades to an empty result at the smallest scope: a failed listing
//! fetch is an empty page, a failed detail fetch is an unenriched record.
//! Nothing here aborts a traversal.

use crate::catalog::Record;
use crate::config::Config;
use crate::crawler::parser::{parse_detail_page, parse_listing_page};
use crate::ident::IdAllocator;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Source of per-page record batches
///
/// The traversal engine only depends on this trait, so tests can drive it
/// with a scripted fetcher instead of a live site.
#[async_trait]
pub trait PageFetcher {
    /// Fetches one listing page and returns its records
    ///
    /// The returned sequence contains no duplicate `source_url` values.
    /// Returns an empty sequence when the page has no records or could not
    /// be fetched.
    async fn fetch_page(&self, category: &str, page: u32) -> Vec<Record>;

    /// Fetches one detail page as a best-effort record
    ///
    /// Returns None when the page could not be fetched.
    async fn fetch_detail(&self, source_url: &str) -> Option<Record>;
}

/// Builds an HTTP client with the configured user agent and timeouts
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.user_agent.name, config.user_agent.version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Live fetcher backed by the catalog site
///
/// Holds the shared id allocator: listing extraction assigns each new
/// record its id, and detail parsing allocates internally as well, so ids
/// from either path never collide.
pub struct HttpFetcher {
    client: Client,
    config: Arc<Config>,
    ids: Arc<Mutex<IdAllocator>>,
}

impl HttpFetcher {
    pub fn new(client: Client, config: Arc<Config>, ids: Arc<Mutex<IdAllocator>>) -> Self {
        Self {
            client,
            config,
            ids,
        }
    }

    /// Listing page URL for a category
    fn listing_url(&self, category: &str, page: u32) -> String {
        format!(
            "{}/list/{}?page={}",
            self.config.site.base_url.trim_end_matches('/'),
            category,
            page
        )
    }

    /// Fetches a URL and returns its body when the response looks usable
    async fn get_html(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Unexpected status {} for {}", status.as_u16(), url);
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Could not read body of {}: {}", url, e);
                None
            }
        }
    }

    /// Enriches listing records with their detail pages, one at a time
    ///
    /// Records are visited strictly in listing order with a fixed pause
    /// between requests. Enrichment writes into the existing record and
    /// never replaces its id.
    async fn enrich_records(&self, records: &mut [Record]) {
        let delay = Duration::from_millis(self.config.crawler.detail_delay_ms);

        for record in records.iter_mut() {
            tokio::time::sleep(delay).await;
            match self.fetch_detail(&record.source_url).await {
                Some(detail) => record.absorb_detail(detail),
                None => {
                    tracing::warn!("No detail data for {}; keeping listing fields", record.source_url);
                }
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, category: &str, page: u32) -> Vec<Record> {
        let url = self.listing_url(category, page);
        tracing::debug!("Fetching listing page {}", url);

        let body = match self.get_html(&url).await {
            Some(body) => body,
            None => return Vec::new(),
        };
        let base = match Url::parse(&url) {
            Ok(base) => base,
            Err(_) => return Vec::new(),
        };

        let items = parse_listing_page(&body, &base);

        let mut records = Vec::with_capacity(items.len());
        {
            let mut ids = self.ids.lock().unwrap();
            for item in items {
                let id = ids.allocate();
                records.push(Record::new(id, &item.title, category, &item.source_url));
            }
        }

        if self.config.crawler.fetch_details {
            self.enrich_records(&mut records).await;
        }

        records
    }

    async fn fetch_detail(&self, source_url: &str) -> Option<Record> {
        let body = self.get_html(source_url).await?;
        let base = Url::parse(source_url).ok()?;

        let fields = parse_detail_page(&body, &base);

        let id = self.ids.lock().unwrap().allocate();
        let mut record = Record::new(id, fields.title.as_deref().unwrap_or(""), "", source_url);
        if let Some(asset_url) = fields.asset_url {
            record.asset_url = asset_url;
        }
        record.image = fields.image;
        record.rating = fields.rating;
        record.region = fields.region;
        record.file_size = fields.file_size;
        record.version = fields.version;
        record.related = fields.related;

        Some(record)
    }
}
