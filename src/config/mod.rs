//! Configuration module for shelfwalker
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a built-in default, so a configuration file is
//! optional; `Config::default()` is a valid working configuration.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
