use crate::effect::Effect;
use crate::msg::{Msg, NotifyPermission};
use crate::poll::PollStep;
use crate::record::{StatusSnapshot, StatusSummary};
use crate::state::{PendingBatch, SessionLog, WatchState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Everything here is synchronous and run-to-completion, so a later message
/// always observes the state left by the previous one. The only asynchronous
/// boundary in the system is the fetch that produces `SnapshotArrived`.
pub fn update(mut state: WatchState, msg: Msg) -> (WatchState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started { now_ms, permission } => {
            state.permission = permission;
            state.pacer.reset();
            if state.session.last_flush_ms == 0 {
                state.session.last_flush_ms = now_ms;
            }
            // First poll is immediate; the backoff schedule takes over once
            // snapshots start settling.
            vec![Effect::SchedulePoll { delay_ms: 0 }]
        }
        Msg::SnapshotArrived { snapshot, now_ms } => apply_snapshot(&mut state, snapshot, now_ms),
        Msg::SnapshotFailed { now_ms: _ } => {
            // A failed poll degrades exactly like an inactive one.
            let config = state.config;
            match state.pacer.observe(false, &config) {
                PollStep::After(delay_ms) => vec![Effect::SchedulePoll { delay_ms }],
                PollStep::Halt => vec![Effect::HaltPolling],
            }
        }
        Msg::FlushDue { now_ms } => {
            state.flush_armed = false;
            if state.pending.is_empty() {
                Vec::new()
            } else {
                state.flush(now_ms);
                vec![Effect::PublishState(state.view())]
            }
        }
    };

    (state, effects)
}

fn apply_snapshot(state: &mut WatchState, snapshot: StatusSnapshot, now_ms: u64) -> Vec<Effect> {
    let config = state.config;
    let mut effects = Vec::new();
    let mut publish = false;

    // A new non-null session id replaces every piece of per-session state in
    // one step: records, pending batch, rate history and the notification
    // guard. A null id is never authoritative.
    if let Some(id) = snapshot.session_id.clone() {
        if state.session.session_id.as_ref() != Some(&id) {
            state.session = SessionLog::fresh(Some(id), now_ms);
            state.pending = PendingBatch::default();
            state.rate.clear();
            state.notified = false;
            state.prev_running = false;
            if state.flush_armed {
                state.flush_armed = false;
                effects.push(Effect::CancelFlush);
            }
            publish = true;
        }
    }

    state.session.summary = StatusSummary::of(&snapshot);

    // Completion fires on the running edge only; subsequent idle snapshots
    // see prev_running == false and stay silent.
    if state.prev_running && !snapshot.running && snapshot.pages_scraped > 0 && !state.notified {
        state.notified = true;
        if state.permission == NotifyPermission::Granted {
            effects.push(Effect::Notify {
                title: "Crawl finished".to_string(),
                body: format!("{} pages scraped", snapshot.pages_scraped),
            });
        }
    }

    let active = snapshot.running && snapshot.pages_scraped > 0;
    if active {
        let reading = state
            .rate
            .observe(snapshot.pages_scraped, snapshot.max_pages, now_ms, config.rate_window);
        effects.push(Effect::PublishRate {
            rate: reading.rate,
            eta_seconds: reading.eta_seconds,
        });
    } else if !snapshot.running && state.rate.is_tracking() {
        // Rate and ETA describe only the running job; publish the clear so
        // consumers drop stale figures.
        state.rate.clear();
        effects.push(Effect::PublishRate {
            rate: None,
            eta_seconds: None,
        });
    }
    state.prev_running = snapshot.running;

    if !snapshot.new_pages.is_empty() || !snapshot.new_files.is_empty() {
        state.pending.pages.extend(snapshot.new_pages);
        state.pending.files.extend(snapshot.new_files);

        let stale = now_ms.saturating_sub(state.session.last_flush_ms) > config.max_flush_age_ms;
        let oversized = state.pending.len() > config.max_pending;
        if stale || oversized {
            if state.flush_armed {
                state.flush_armed = false;
                effects.push(Effect::CancelFlush);
            }
            state.flush(now_ms);
            publish = true;
        } else {
            // Re-arming replaces any earlier deadline, coalescing bursts.
            state.flush_armed = true;
            effects.push(Effect::ScheduleFlush {
                delay_ms: config.debounce_ms,
            });
        }
    }

    if publish {
        effects.push(Effect::PublishState(state.view()));
    }

    match state.pacer.observe(active, &config) {
        PollStep::After(delay_ms) => effects.push(Effect::SchedulePoll { delay_ms }),
        PollStep::Halt => effects.push(Effect::HaltPolling),
    }

    effects
}
