//! Output module for harvest results
//!
//! This module handles:
//! - Writing the two JSON result files
//! - Summarizing a run once crawling is done
//!
//! Output runs only after every stage has finished, so any failure here is
//! fatal for the run.

mod json;
mod summary;

pub use json::{read_records, records_to_json, write_records};
pub use summary::{print_summary, HarvestSummary};

use crate::pipeline::HarvestResult;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to encode records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes both result files for a finished harvest
///
/// # Arguments
///
/// * `result` - The finished harvest
/// * `all_path` - Destination for every record
/// * `directory_path` - Destination for records with directory links
pub fn write_results(
    result: &HarvestResult,
    all_path: &Path,
    directory_path: &Path,
) -> OutputResult<()> {
    write_records(&result.all_records, all_path)?;
    write_records(&result.records_with_links, directory_path)?;
    Ok(())
}
