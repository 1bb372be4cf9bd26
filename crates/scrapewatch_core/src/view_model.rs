use std::collections::BTreeMap;

use crate::rate::RateSample;
use crate::record::{FileRecord, PageRecord};

/// Read-only view of the accumulated session state, published to the
/// consumer after every flush or reset. The consumer must treat it as a
/// snapshot; the engine keeps ownership of the live state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    pub session_id: Option<String>,
    pub running: bool,
    pub paused: bool,
    pub pages_scraped: u64,
    pub max_pages: u64,
    pub queue_size: u64,
    pub file_type_counts: BTreeMap<String, u64>,
    /// Deduplicated pages in first-seen order.
    pub pages: Vec<PageRecord>,
    /// Deduplicated files in first-seen order.
    pub files: Vec<FileRecord>,
    /// Bounded throughput history for trend display.
    pub rate_samples: Vec<RateSample>,
}
