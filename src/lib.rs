//! Spinneret: a bounded, concurrent breadth-first web crawler
//!
//! This crate crawls outward from a single seed URL, records the links
//! discovered on every visited page, and stops once a visit quota is reached
//! or no reachable work remains. Concurrency comes from a fixed pool of
//! workers draining a shared frontier; an atomic reservation protocol
//! guarantees that no URL is visited twice and the quota is never exceeded.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Spinneret operations
#[derive(Debug, Error)]
pub enum SpinneretError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Worker task failed: {0}")]
    WorkerPanic(String),
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

    #[error("Invalid url-regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Result type alias for Spinneret operations
pub type Result<T> = std::result::Result<T, SpinneretError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::crawler::{CrawlRecord, Spider};
pub use crate::url::resolve_link;
