//! The three harvest stages
//!
//! Each stage tells the orchestrator which URL an input maps to, how to seed
//! a fresh accumulator when the visit begins, which extraction rules fill
//! it, and what to do once the page is done.

use crate::config::SelectorConfig;
use crate::crawler::extractor::{ExtractionRule, RuleSet};
use crate::record::Record;
use crate::url::normalize;
use crate::ConfigError;

/// Substring an anchor's text must contain to count as a directory link
pub const DISCOVERY_PATTERN: &str = "directory";

/// Returns true if anchor text looks like a link to a staff directory
///
/// Matching is a case-insensitive substring test, so "School Directory" and
/// "DIRECTORY" qualify while "Director" does not.
pub fn matches_discovery_pattern(text: &str) -> bool {
    text.to_lowercase().contains(DISCOVERY_PATTERN)
}

/// One fetch-and-extract step of the pipeline
pub trait Stage {
    type Input;
    type Output;

    /// Label used in logs and failure reports
    const NAME: &'static str;

    /// URL to fetch for `input`
    fn target_url(&self, input: &Self::Input) -> String;

    /// Creates the accumulator for a visit that is about to start
    fn begin(&self, input: Self::Input, url: &str) -> Self::Output;

    fn rules(&self) -> &RuleSet<Self::Output>;

    /// Called once extraction for `url` has finished or the fetch failed
    fn complete(&self, _output: &mut Self::Output, _url: &str) {}
}

/// Listing page → links to detail pages
pub struct DetailLinkStage {
    rules: RuleSet<Vec<String>>,
}

impl DetailLinkStage {
    /// Builds the stage; detail hrefs are resolved against `origin`
    pub fn new(selector: &str, origin: impl Into<String>) -> Result<Self, ConfigError> {
        let origin = origin.into();
        let rules = RuleSet::new().with(ExtractionRule::each(
            selector,
            move |links: &mut Vec<String>, node| {
                let Some(href) = node.attr("href") else {
                    return;
                };
                match normalize(href, &origin) {
                    Ok(link) => {
                        tracing::debug!("Link found: {:?} -> {}", node.text(), link);
                        links.push(link);
                    }
                    Err(e) => tracing::warn!("Skipping detail link: {}", e),
                }
            },
        )?);

        Ok(Self { rules })
    }
}

impl Stage for DetailLinkStage {
    type Input = String;
    type Output = Vec<String>;

    const NAME: &'static str = "listing";

    fn target_url(&self, input: &String) -> String {
        input.clone()
    }

    fn begin(&self, _input: String, _url: &str) -> Vec<String> {
        Vec::new()
    }

    fn rules(&self) -> &RuleSet<Vec<String>> {
        &self.rules
    }

    fn complete(&self, links: &mut Vec<String>, url: &str) {
        tracing::info!("Finished {} ({} detail links)", url, links.len());
    }
}

/// Detail page → record fields
pub struct RecordStage {
    rules: RuleSet<Record>,
}

impl RecordStage {
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        let rules = RuleSet::new()
            .with(ExtractionRule::first(
                &selectors.region,
                |record: &mut Record, node| {
                    record.region = node.text();
                    tracing::debug!("County found: {:?}", record.region);
                },
            )?)
            .with(ExtractionRule::first(
                &selectors.name,
                |record: &mut Record, node| {
                    record.name = node.text();
                    tracing::debug!("Name found: {:?}", record.name);
                },
            )?)
            .with(ExtractionRule::first(
                &selectors.code,
                |record: &mut Record, node| {
                    record.code = node.text();
                    tracing::debug!("CDS code found: {:?}", record.code);
                },
            )?)
            .with(ExtractionRule::first(
                &selectors.website,
                |record: &mut Record, node| {
                    if let Some(href) = node.attr("href") {
                        record.home_url = href.trim().to_string();
                        tracing::debug!("Website found: {:?} -> {}", node.text(), record.home_url);
                    }
                },
            )?);

        Ok(Self { rules })
    }
}

impl Stage for RecordStage {
    type Input = String;
    type Output = Record;

    const NAME: &'static str = "detail";

    fn target_url(&self, input: &String) -> String {
        input.clone()
    }

    fn begin(&self, _input: String, url: &str) -> Record {
        Record::new(url)
    }

    fn rules(&self) -> &RuleSet<Record> {
        &self.rules
    }

    fn complete(&self, record: &mut Record, url: &str) {
        if !record.is_complete() {
            tracing::warn!("Incomplete record from {} (code or name missing)", url);
        }
        tracing::info!("Finished {}", url);
    }
}

/// Record website → candidate directory links on that record
pub struct LinkDiscoveryStage {
    rules: RuleSet<Record>,
}

impl LinkDiscoveryStage {
    pub fn new() -> Result<Self, ConfigError> {
        let rules = RuleSet::new().with(ExtractionRule::each(
            "a[href]",
            |record: &mut Record, node| {
                let text = node.text();
                if !matches_discovery_pattern(&text) {
                    return;
                }
                let Some(href) = node.attr("href") else {
                    return;
                };
                tracing::debug!("Possible directory found: {:?} -> {}", text, href);

                let link = match normalize(href, &record.home_url) {
                    Ok(link) => link,
                    Err(e) => {
                        tracing::warn!("Skipping directory link: {}", e);
                        return;
                    }
                };

                if record.add_discovered_link(link) {
                    tracing::debug!("Link saved");
                } else {
                    tracing::debug!("Link discarded (duplicate)");
                }
            },
        )?);

        Ok(Self { rules })
    }
}

impl Stage for LinkDiscoveryStage {
    type Input = Record;
    type Output = Record;

    const NAME: &'static str = "discovery";

    fn target_url(&self, record: &Record) -> String {
        record.home_url.clone()
    }

    fn begin(&self, record: Record, _url: &str) -> Record {
        record
    }

    fn rules(&self) -> &RuleSet<Record> {
        &self.rules
    }

    fn complete(&self, record: &mut Record, url: &str) {
        if record.has_links() {
            tracing::info!(
                "Finished {} ({} possible directories)",
                url,
                record.discovered_links().len()
            );
        } else {
            tracing::info!("Finished {}", url);
        }
    }
}
