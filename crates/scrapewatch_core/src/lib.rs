//! Scrapewatch core: pure synchronization state machine for crawl-status polling.
//!
//! All IO, timers and clock reads live in `scrapewatch_engine`; this crate only
//! folds status snapshots into accumulated session state and answers with the
//! effects the shell should perform (schedule a poll, arm a flush, publish
//! state, fire a notification).
mod config;
mod effect;
mod merge;
mod msg;
mod poll;
mod rate;
mod record;
mod state;
mod update;
mod view_model;

pub use config::WatchConfig;
pub use effect::Effect;
pub use merge::{merge_files, merge_pages};
pub use msg::{Msg, NotifyPermission};
pub use rate::{RateEstimator, RateReading, RateSample};
pub use record::{DownloadStatus, FileRecord, PageRecord, StatusSnapshot, StatusSummary};
pub use state::{PendingBatch, WatchState};
pub use update::update;
pub use view_model::SessionView;
