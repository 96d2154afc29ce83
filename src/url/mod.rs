//! URL handling module for School-Harvest
//!
//! This module provides link resolution against a site origin and the
//! per-record duplicate check used before a discovered link is stored.

mod dedup;
mod normalize;

// Re-export main functions
pub use dedup::is_new;
pub use normalize::normalize;
