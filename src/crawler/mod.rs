//! Crawler module for page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageSource` seam
//! - Declarative selector-based extraction
//! - The three harvest stages
//! - Order-preserving stage orchestration

mod extractor;
mod fetcher;
mod orchestrator;
mod stages;

pub use extractor::{compile_selector, Cardinality, ExtractionRule, MatchedNode, RuleSet};
pub use fetcher::{build_http_client, fetch_page, FetchError, HttpFetcher, PageSource};
pub use orchestrator::{FailedVisit, Orchestrator, StageRun};
pub use stages::{
    matches_discovery_pattern, DetailLinkStage, LinkDiscoveryStage, RecordStage, Stage,
    DISCOVERY_PATTERN,
};
