use serde::Deserialize;

/// Main configuration structure for shelfwalker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Catalog site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://catalog.example.com".to_string(),
        }
    }
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between listing-page requests (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Pause between detail-page and asset requests (milliseconds)
    #[serde(rename = "detail-delay-ms")]
    pub detail_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Whether listing records are enriched with a detail-page fetch
    #[serde(rename = "fetch-details")]
    pub fetch_details: bool,

    /// Defensive ceiling on pages fetched per traversal
    ///
    /// Traversal normally terminates on the source's own stop signals; this
    /// cap only guards against a source that never exhausts. Unset means
    /// unlimited.
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 500,
            detail_delay_ms: 250,
            request_timeout_secs: 30,
            fetch_details: true,
            max_pages: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    pub name: String,

    /// Version of the scraper
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "shelfwalker".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON catalog document
    #[serde(rename = "catalog-path")]
    pub catalog_path: String,

    /// Path to the persisted id-counter state file
    #[serde(rename = "state-path")]
    pub state_path: String,

    /// Directory assets are downloaded into
    #[serde(rename = "download-dir")]
    pub download_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.json".to_string(),
            state_path: "shelfwalker_state.json".to_string(),
            download_dir: "downloads".to_string(),
        }
    }
}
