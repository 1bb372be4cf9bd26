use std::collections::BTreeMap;

/// One crawled page as reported by the status endpoint.
///
/// `id` is the server-assigned identity; two records with the same id are the
/// same page regardless of which snapshot delivered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub depth: u32,
    /// Server-issued timestamp, treated as opaque text.
    pub scraped_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Success,
    Failed,
}

/// One downloaded file as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub file_name: String,
    pub extension: String,
    pub size_bytes: u64,
    pub status: DownloadStatus,
    pub page_url: String,
    /// Server-issued timestamp, treated as opaque text.
    pub downloaded_at: String,
}

impl FileRecord {
    /// Identity key. The server assigns no unique id to file records, so the
    /// name/timestamp pair stands in for one.
    pub fn identity(&self) -> (&str, &str) {
        (&self.file_name, &self.downloaded_at)
    }
}

/// One poll result: current job status plus any records produced since the
/// previous snapshot. Consumed by a single `update` call and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    pub running: bool,
    pub paused: bool,
    pub session_id: Option<String>,
    pub pages_scraped: u64,
    pub max_pages: u64,
    pub queue_size: u64,
    pub new_pages: Vec<PageRecord>,
    pub new_files: Vec<FileRecord>,
    pub file_type_counts: BTreeMap<String, u64>,
}

/// The counters and flags of the most recent snapshot, retained for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSummary {
    pub running: bool,
    pub paused: bool,
    pub pages_scraped: u64,
    pub max_pages: u64,
    pub queue_size: u64,
    pub file_type_counts: BTreeMap<String, u64>,
}

impl StatusSummary {
    pub(crate) fn of(snapshot: &StatusSnapshot) -> Self {
        Self {
            running: snapshot.running,
            paused: snapshot.paused,
            pages_scraped: snapshot.pages_scraped,
            max_pages: snapshot.max_pages,
            queue_size: snapshot.queue_size,
            file_type_counts: snapshot.file_type_counts.clone(),
        }
    }
}
