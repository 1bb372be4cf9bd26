use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use scrapewatch_core::{update, Effect, Msg, WatchState};
use watch_logging::{watch_debug, watch_warn};

use crate::fetch::StatusFetcher;
use crate::notify::NotificationSink;
use crate::types::WatchEvent;
use crate::watcher::Command;

/// The single cooperative task that owns both deadlines.
///
/// Everything between awaits runs to completion, so flushes are strictly
/// ordered and a session reset can never interleave with a half-applied
/// merge. At most one fetch is in flight: the next poll deadline is only
/// computed after the current fetch settles.
pub(crate) async fn run_driver(
    mut state: WatchState,
    fetcher: Arc<dyn StatusFetcher>,
    sink: Arc<dyn NotificationSink>,
    mut cmd_rx: tokio::sync::mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<WatchEvent>,
) {
    let epoch = Instant::now();
    let mut poll_deadline: Option<Instant> = None;
    let mut flush_deadline: Option<Instant> = None;
    let mut started = false;
    let mut halt_reported = false;

    loop {
        let next_deadline = match (poll_deadline, flush_deadline) {
            (Some(poll), Some(flush)) => Some(poll.min(flush)),
            (Some(poll), None) => Some(poll),
            (None, Some(flush)) => Some(flush),
            (None, None) => None,
        };
        let sleep_target =
            next_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400));

        tokio::select! {
            command = cmd_rx.recv() => match command {
                Some(Command::Start) => {
                    started = true;
                    halt_reported = false;
                    let msg = Msg::Started {
                        now_ms: elapsed_ms(epoch),
                        permission: sink.permission(),
                    };
                    state = step(state, msg, &mut poll_deadline, &mut flush_deadline, &sink, &event_tx);
                }
                Some(Command::Stop) | None => {
                    // Both deadlines die with the task; nothing fires after this.
                    poll_deadline = None;
                    flush_deadline = None;
                    break;
                }
            },
            _ = tokio::time::sleep_until(sleep_target), if next_deadline.is_some() => {
                let now = Instant::now();
                if flush_deadline.is_some_and(|deadline| deadline <= now) {
                    flush_deadline = None;
                    let msg = Msg::FlushDue { now_ms: elapsed_ms(epoch) };
                    state = step(state, msg, &mut poll_deadline, &mut flush_deadline, &sink, &event_tx);
                } else if poll_deadline.is_some_and(|deadline| deadline <= now) {
                    poll_deadline = None;
                    let msg = match fetcher.fetch().await {
                        Ok(snapshot) => Msg::SnapshotArrived {
                            snapshot,
                            now_ms: elapsed_ms(epoch),
                        },
                        Err(err) => {
                            watch_warn!("status poll failed: {err}");
                            let _ = event_tx.send(WatchEvent::PollFailed {
                                error: err.to_string(),
                            });
                            Msg::SnapshotFailed { now_ms: elapsed_ms(epoch) }
                        }
                    };
                    state = step(state, msg, &mut poll_deadline, &mut flush_deadline, &sink, &event_tx);
                }

                if started && poll_deadline.is_none() && flush_deadline.is_none() && !halt_reported {
                    halt_reported = true;
                    watch_debug!("polling halted after sustained inactivity");
                    let _ = event_tx.send(WatchEvent::Halted);
                }
            }
        }
    }
}

fn step(
    state: WatchState,
    msg: Msg,
    poll_deadline: &mut Option<Instant>,
    flush_deadline: &mut Option<Instant>,
    sink: &Arc<dyn NotificationSink>,
    event_tx: &mpsc::Sender<WatchEvent>,
) -> WatchState {
    let (state, effects) = update(state, msg);
    for effect in effects {
        match effect {
            Effect::SchedulePoll { delay_ms } => {
                *poll_deadline = Some(Instant::now() + Duration::from_millis(delay_ms));
            }
            Effect::HaltPolling => {
                *poll_deadline = None;
            }
            Effect::ScheduleFlush { delay_ms } => {
                *flush_deadline = Some(Instant::now() + Duration::from_millis(delay_ms));
            }
            Effect::CancelFlush => {
                *flush_deadline = None;
            }
            Effect::PublishState(view) => {
                let _ = event_tx.send(WatchEvent::StateChanged(view));
            }
            Effect::PublishRate { rate, eta_seconds } => {
                let _ = event_tx.send(WatchEvent::RateUpdated { rate, eta_seconds });
            }
            Effect::Notify { title, body } => {
                sink.notify(&title, &body);
            }
        }
    }
    state
}

fn elapsed_ms(epoch: Instant) -> u64 {
    epoch.elapsed().as_millis() as u64
}
