use crate::config::WatchConfig;

/// What the poll timer should do after a snapshot (or failure) settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollStep {
    After(u64),
    Halt,
}

/// Tracks consecutive inactive polls and picks the next interval.
///
/// Transport failures feed the same counter as inactive snapshots, so a dead
/// endpoint backs off and eventually halts instead of polling forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PollPacer {
    idle_streak: u32,
}

impl PollPacer {
    pub(crate) fn observe(&mut self, active: bool, config: &WatchConfig) -> PollStep {
        if active {
            self.idle_streak = 0;
            return PollStep::After(config.active_poll_ms);
        }
        self.idle_streak = self.idle_streak.saturating_add(1);
        if self.idle_streak >= config.halt_after {
            PollStep::Halt
        } else if self.idle_streak >= config.backoff_after {
            PollStep::After(config.idle_poll_ms)
        } else {
            PollStep::After(config.active_poll_ms)
        }
    }

    pub(crate) fn reset(&mut self) {
        self.idle_streak = 0;
    }
}
