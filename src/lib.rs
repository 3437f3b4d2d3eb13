//! Shelfwalker: an incremental catalog scraper
//!
//! This crate scrapes a paginated catalog site page by page, extracts item
//! records from listing and detail pages, assigns stable sequential ids,
//! deduplicates across pages, and merges the results into a single JSON
//! document keyed by category.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod download;
pub mod ident;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for shelfwalker operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Download error: {0}")]
    Download(#[from] download::DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for shelfwalker operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CatalogDocument, CategoryDocument, PageEntry, PageLabel, Record};
pub use config::Config;
pub use ident::IdAllocator;
