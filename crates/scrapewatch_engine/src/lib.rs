//! Scrapewatch engine: the IO shell around the core state machine.
//!
//! Owns the single driver task (poll and flush deadlines, fetch execution,
//! effect application) and the consumer-facing [`WatcherHandle`].
mod driver;
mod fetch;
mod notify;
mod types;
mod watcher;
mod wire;

pub use fetch::{FailureKind, FetchError, FetchSettings, HttpStatusFetcher, StatusFetcher};
pub use notify::{LogNotificationSink, NotificationSink};
pub use types::WatchEvent;
pub use watcher::WatcherHandle;
