//! Configuration module for School-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Running without a file uses [`Config::default`], which targets the
//! California school directory.
//!
//! # Example
//!
//! ```no_run
//! use school_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Listing pages: {}", config.listing.urls.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ListingConfig, OutputConfig, SelectorConfig, UserAgentConfig,
    DEFAULT_ORIGIN,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
