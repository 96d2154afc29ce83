//! School-Harvest: a staged directory crawler
//!
//! This crate walks a paginated school directory in three dependent stages:
//! listing pages yield detail-page links, detail pages yield records, and each
//! record's own website is scanned for links that look like a staff directory.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for School-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
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

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Cannot resolve relative link '{0}' against an empty origin")]
    EmptyOrigin(String),
}

/// Result type alias for School-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{HarvestResult, Pipeline};
pub use record::Record;
pub use crate::url::{is_new, normalize};
