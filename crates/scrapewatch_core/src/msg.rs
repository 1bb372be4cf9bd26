use crate::record::StatusSnapshot;

/// Outcome of the one-time notification permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPermission {
    Granted,
    Denied,
    /// The user has never been asked.
    Undecided,
}

/// Inputs to the state machine. All wall-clock time enters through the
/// `now_ms` payloads; the core never reads a clock itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Polling started (or restarted) by the consumer.
    Started {
        now_ms: u64,
        permission: NotifyPermission,
    },
    /// One status request settled successfully.
    SnapshotArrived {
        snapshot: StatusSnapshot,
        now_ms: u64,
    },
    /// The status request failed, or returned an unusable payload.
    SnapshotFailed { now_ms: u64 },
    /// The deferred flush timer fired.
    FlushDue { now_ms: u64 },
}
