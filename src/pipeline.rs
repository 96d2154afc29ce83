//! Pipeline driver
//!
//! Chains the three stages: listing pages feed detail URLs, detail URLs feed
//! records, and records are enriched with directory links from their own
//! websites. The result is split into every record and the subset that
//! gained at least one link.

use crate::config::Config;
use crate::crawler::{
    DetailLinkStage, FailedVisit, HttpFetcher, LinkDiscoveryStage, Orchestrator, PageSource,
    RecordStage,
};
use crate::record::Record;
use crate::ConfigError;

/// Output of a complete harvest
#[derive(Debug, Default)]
pub struct HarvestResult {
    /// Every record, in detail-page visit order
    pub all_records: Vec<Record>,

    /// Records with at least one discovered link, in `all_records` order
    pub records_with_links: Vec<Record>,

    /// Every failed visit across all stages
    pub failures: Vec<FailedVisit>,

    pub listing_pages: usize,

    pub detail_links: usize,
}

/// Returns the records that gained at least one directory link
pub fn partition_by_links(records: &[Record]) -> Vec<Record> {
    records.iter().filter(|r| r.has_links()).cloned().collect()
}

/// The configured three-stage harvest
pub struct Pipeline<P> {
    orchestrator: Orchestrator<P>,
    detail_links: DetailLinkStage,
    records: RecordStage,
    discovery: LinkDiscoveryStage,
}

impl Pipeline<HttpFetcher> {
    /// Builds a pipeline that fetches over HTTP
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        Ok(Self::new(fetcher, config)?)
    }
}

impl<P: PageSource> Pipeline<P> {
    /// Builds a pipeline around any page source
    ///
    /// Fails if a configured selector does not compile.
    pub fn new(source: P, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            orchestrator: Orchestrator::from_config(source, &config.crawler),
            detail_links: DetailLinkStage::new(
                &config.selectors.detail_link,
                config.listing.origin.clone(),
            )?,
            records: RecordStage::new(&config.selectors)?,
            discovery: LinkDiscoveryStage::new()?,
        })
    }

    /// Runs all three stages over `listing_urls`
    ///
    /// Fetch failures never abort the run; they are collected in
    /// [`HarvestResult::failures`].
    pub async fn execute(&self, listing_urls: &[String]) -> HarvestResult {
        let mut failures = Vec::new();

        // Stage 1: listing pages → detail URLs, flattened in listing order
        let listing = self
            .orchestrator
            .run(&self.detail_links, listing_urls.to_vec())
            .await;
        failures.extend(listing.failures);
        let detail_urls: Vec<String> = listing.outputs.into_iter().flatten().collect();
        tracing::info!(
            "Collected {} detail links from {} listing pages",
            detail_urls.len(),
            listing_urls.len()
        );
        let detail_links = detail_urls.len();

        // Stage 2: detail URLs → records
        let details = self.orchestrator.run(&self.records, detail_urls).await;
        failures.extend(details.failures);

        // Stage 3: records → records with directory links
        let discovery = self.orchestrator.run(&self.discovery, details.outputs).await;
        failures.extend(discovery.failures);

        let all_records = discovery.outputs;
        let records_with_links = partition_by_links(&all_records);
        tracing::info!(
            "Harvested {} records, {} with possible directories",
            all_records.len(),
            records_with_links.len()
        );

        HarvestResult {
            all_records,
            records_with_links,
            failures,
            listing_pages: listing_urls.len(),
            detail_links,
        }
    }
}
