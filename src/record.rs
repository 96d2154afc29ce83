//! The harvested school record
//!
//! A record is created when a detail-page visit begins, filled in by the
//! detail stage's extraction rules, and later enriched with directory links
//! by the link discovery stage.

use crate::url::is_new;
use serde::{Deserialize, Serialize};

/// One directory entry
///
/// Field names on the wire follow the layout downstream consumers already
/// read (`CdsCode`, `County`, `Name`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier parsed from the detail page
    #[serde(rename = "CdsCode")]
    pub code: String,

    /// Jurisdiction label
    #[serde(rename = "County")]
    pub region: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Canonical external website, empty until extracted
    #[serde(rename = "Website")]
    pub home_url: String,

    /// Candidate directory links found on `home_url`, in discovery order
    #[serde(rename = "DirectoryLinks", default)]
    discovered_links: Vec<String>,

    /// Detail page this record was built from
    #[serde(rename = "CdsLink")]
    source_url: String,
}

impl Record {
    /// Creates an empty record bound to the detail page it is read from
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn discovered_links(&self) -> &[String] {
        &self.discovered_links
    }

    /// Appends an already-normalized link unless the record holds it already
    ///
    /// Returns true if the link was stored.
    pub fn add_discovered_link(&mut self, link: String) -> bool {
        if is_new(&self.discovered_links, &link) {
            self.discovered_links.push(link);
            true
        } else {
            false
        }
    }

    pub fn has_links(&self) -> bool {
        !self.discovered_links.is_empty()
    }

    /// Returns true if both the identifier and the name were extracted
    ///
    /// Records with missing fields are still kept; this only lets callers
    /// tell a partial page apart from a complete one.
    pub fn is_complete(&self) -> bool {
        !self.code.is_empty() && !self.name.is_empty()
    }
}
