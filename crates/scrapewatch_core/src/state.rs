use crate::config::WatchConfig;
use crate::merge::{merge_files, merge_pages};
use crate::msg::NotifyPermission;
use crate::poll::PollPacer;
use crate::rate::RateEstimator;
use crate::record::{FileRecord, PageRecord, StatusSummary};
use crate::view_model::SessionView;

/// Records delivered by snapshots but not yet merged into the session log.
/// Always drained atomically on flush, never partially.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingBatch {
    pub pages: Vec<PageRecord>,
    pub files: Vec<FileRecord>,
}

impl PendingBatch {
    pub fn len(&self) -> usize {
        self.pages.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.files.is_empty()
    }
}

/// Everything that belongs to one crawl session and is replaced wholesale
/// when the server reports a new session id.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SessionLog {
    pub(crate) session_id: Option<String>,
    pub(crate) pages: Vec<PageRecord>,
    pub(crate) files: Vec<FileRecord>,
    pub(crate) summary: StatusSummary,
    pub(crate) last_flush_ms: u64,
}

impl SessionLog {
    pub(crate) fn fresh(session_id: Option<String>, now_ms: u64) -> Self {
        Self {
            session_id,
            last_flush_ms: now_ms,
            ..Self::default()
        }
    }
}

/// The whole state machine state. Owned exclusively by the engine; consumers
/// only ever see [`SessionView`] snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchState {
    pub(crate) config: WatchConfig,
    pub(crate) permission: NotifyPermission,
    pub(crate) session: SessionLog,
    pub(crate) pending: PendingBatch,
    pub(crate) pacer: PollPacer,
    pub(crate) rate: RateEstimator,
    pub(crate) prev_running: bool,
    pub(crate) notified: bool,
    pub(crate) flush_armed: bool,
}

impl WatchState {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            config,
            permission: NotifyPermission::Undecided,
            session: SessionLog::default(),
            pending: PendingBatch::default(),
            pacer: PollPacer::default(),
            rate: RateEstimator::default(),
            prev_running: false,
            notified: false,
            flush_armed: false,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Merges the pending batch into the session log and stamps the flush
    /// clock. Runs to completion on the caller's turn; there is no window in
    /// which the batch is half-applied.
    pub(crate) fn flush(&mut self, now_ms: u64) {
        let batch = std::mem::take(&mut self.pending);
        merge_pages(&mut self.session.pages, batch.pages);
        merge_files(&mut self.session.files, batch.files);
        self.session.last_flush_ms = now_ms;
        debug_assert!(no_duplicate_pages(&self.session.pages));
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.session.session_id.clone(),
            running: self.session.summary.running,
            paused: self.session.summary.paused,
            pages_scraped: self.session.summary.pages_scraped,
            max_pages: self.session.summary.max_pages,
            queue_size: self.session.summary.queue_size,
            file_type_counts: self.session.summary.file_type_counts.clone(),
            pages: self.session.pages.clone(),
            files: self.session.files.clone(),
            rate_samples: self.rate.samples().copied().collect(),
        }
    }
}

fn no_duplicate_pages(pages: &[PageRecord]) -> bool {
    let mut ids: Vec<&str> = pages.iter().map(|page| page.id.as_str()).collect();
    ids.sort_unstable();
    ids.windows(2).all(|pair| pair[0] != pair[1])
}
