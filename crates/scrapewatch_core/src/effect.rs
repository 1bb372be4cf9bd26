use crate::view_model::SessionView;

/// Side effects requested by `update`. The engine is the only component that
/// owns timers or channels; the core only asks.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Arm the poll timer. The next fetch must start only after this delay
    /// has elapsed, never while a previous fetch is still in flight.
    SchedulePoll { delay_ms: u64 },
    /// Stop polling entirely. Terminal until the consumer restarts.
    HaltPolling,
    /// Arm (or re-arm, replacing any earlier deadline) the deferred flush.
    ScheduleFlush { delay_ms: u64 },
    /// Drop a previously armed flush deadline.
    CancelFlush,
    /// Hand the consumer a fresh view of the accumulated session state.
    PublishState(SessionView),
    /// Hand the consumer the current throughput estimate.
    PublishRate {
        rate: Option<f64>,
        eta_seconds: Option<f64>,
    },
    /// Fire a one-shot completion notification.
    Notify { title: String, body: String },
}
