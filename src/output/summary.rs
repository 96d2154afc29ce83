//! Run summary
//!
//! Counts what a harvest produced and prints it once the result files are
//! written.

use crate::pipeline::HarvestResult;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Totals for one harvest run
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    pub listing_pages: usize,
    pub detail_links: usize,
    pub records: usize,

    /// Records missing their code or name
    pub incomplete_records: usize,

    pub records_with_links: usize,

    /// Sum of discovered links across all records
    pub total_links: usize,

    /// Failed visits keyed by stage name
    pub failures_by_stage: BTreeMap<&'static str, usize>,
}

impl HarvestSummary {
    pub fn from_result(
        result: &HarvestResult,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut failures_by_stage = BTreeMap::new();
        for failure in &result.failures {
            *failures_by_stage.entry(failure.stage).or_insert(0) += 1;
        }

        Self {
            started_at,
            finished_at,
            listing_pages: result.listing_pages,
            detail_links: result.detail_links,
            records: result.all_records.len(),
            incomplete_records: result
                .all_records
                .iter()
                .filter(|r| !r.is_complete())
                .count(),
            records_with_links: result.records_with_links.len(),
            total_links: result
                .all_records
                .iter()
                .map(|r| r.discovered_links().len())
                .sum(),
            failures_by_stage,
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    pub fn total_failures(&self) -> usize {
        self.failures_by_stage.values().sum()
    }

    /// Share of records that gained at least one link, as a percentage
    pub fn link_rate(&self) -> f64 {
        if self.records > 0 {
            (self.records_with_links as f64 / self.records as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Finished: {}", summary.finished_at.to_rfc3339());
    println!("  Duration: {} seconds", summary.duration_seconds());
    println!();

    println!("Overview:");
    println!("  Listing pages: {}", summary.listing_pages);
    println!("  Detail links: {}", summary.detail_links);
    println!(
        "  Records: {} ({} incomplete)",
        summary.records, summary.incomplete_records
    );
    println!(
        "  Records with possible directories: {} ({:.1}%)",
        summary.records_with_links,
        summary.link_rate()
    );
    println!("  Directory links found: {}", summary.total_links);
    println!();

    if !summary.failures_by_stage.is_empty() {
        println!("Failed Visits ({}):", summary.total_failures());
        for (stage, count) in &summary.failures_by_stage {
            println!("  {}: {}", stage, count);
        }
        println!();
    }
}
