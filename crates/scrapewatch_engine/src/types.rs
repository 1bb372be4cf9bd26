use scrapewatch_core::SessionView;

/// What the engine reports to its consumer. Delivered through the handle's
/// event channel; consumers drain with `try_recv`.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// The accumulated session state after a flush or reset.
    StateChanged(SessionView),
    /// Throughput estimate after an active snapshot, or the clearing of a
    /// stale estimate once the job stops.
    RateUpdated {
        rate: Option<f64>,
        eta_seconds: Option<f64>,
    },
    /// One poll settled with an error. Polling continues on the backoff
    /// schedule; this is informational.
    PollFailed { error: String },
    /// Polling reached the sustained-inactivity threshold and stopped. The
    /// consumer may call `start` again to resume.
    Halted,
}
