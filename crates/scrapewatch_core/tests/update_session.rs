use std::sync::Once;

use scrapewatch_core::{
    update, DownloadStatus, Effect, FileRecord, Msg, NotifyPermission, PageRecord, SessionView,
    StatusSnapshot, WatchConfig, WatchState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

fn page(id: &str) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        url: format!("https://example.com/{id}"),
        title: String::new(),
        depth: 0,
        scraped_at: "2026-08-05T10:00:00Z".to_string(),
    }
}

fn file(name: &str, at: &str) -> FileRecord {
    FileRecord {
        file_name: name.to_string(),
        extension: "pdf".to_string(),
        size_bytes: 1024,
        status: DownloadStatus::Success,
        page_url: "https://example.com".to_string(),
        downloaded_at: at.to_string(),
    }
}

fn snapshot(session: Option<&str>, running: bool, scraped: u64) -> StatusSnapshot {
    StatusSnapshot {
        running,
        session_id: session.map(str::to_string),
        pages_scraped: scraped,
        max_pages: 50,
        ..StatusSnapshot::default()
    }
}

fn started() -> WatchState {
    let (state, _) = update(
        WatchState::new(WatchConfig::default()),
        Msg::Started {
            now_ms: 0,
            permission: NotifyPermission::Granted,
        },
    );
    state
}

fn published_view(effects: &[Effect]) -> Option<&SessionView> {
    effects.iter().find_map(|effect| match effect {
        Effect::PublishState(view) => Some(view),
        _ => None,
    })
}

#[test]
fn first_session_id_is_adopted_and_published() {
    init_logging();
    let (_state, effects) = update(
        started(),
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("alpha"), true, 1),
            now_ms: 10,
        },
    );
    let view = published_view(&effects).expect("adoption publishes");
    assert_eq!(view.session_id.as_deref(), Some("alpha"));
}

#[test]
fn a_null_session_id_never_triggers_a_reset() {
    init_logging();
    let mut snap = snapshot(Some("alpha"), true, 3);
    snap.new_pages = vec![page("a")];
    let (state, _) = update(started(), Msg::SnapshotArrived { snapshot: snap, now_ms: 10 });
    let (state, _) = update(state, Msg::FlushDue { now_ms: 2_010 });

    let (state, effects) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(None, true, 4),
            now_ms: 5_010,
        },
    );
    assert!(published_view(&effects).is_none());
    assert_eq!(state.view().session_id.as_deref(), Some("alpha"));
    assert_eq!(state.view().pages.len(), 1);
}

#[test]
fn a_new_session_id_clears_everything_at_once() {
    init_logging();
    let mut snap = snapshot(Some("alpha"), true, 3);
    snap.new_pages = vec![page("a"), page("b")];
    snap.new_files = vec![file("report.pdf", "2026-08-05T10:00:01Z")];
    let (state, _) = update(started(), Msg::SnapshotArrived { snapshot: snap, now_ms: 10 });
    let (state, _) = update(state, Msg::FlushDue { now_ms: 2_010 });

    // Build up rate history so the reset has something to clear.
    let (state, _) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("alpha"), true, 10),
            now_ms: 10_000,
        },
    );
    assert!(!state.view().rate_samples.is_empty());

    let (state, effects) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("beta"), true, 1),
            now_ms: 15_000,
        },
    );

    // No frame may show old-session records against new-session counters.
    let view = published_view(&effects).expect("reset publishes");
    assert_eq!(view.session_id.as_deref(), Some("beta"));
    assert!(view.pages.is_empty());
    assert!(view.files.is_empty());

    let live = state.view();
    assert!(live.pages.is_empty());
    assert!(live.files.is_empty());
    assert!(live.rate_samples.iter().all(|s| s.at_ms >= 15_000));
}

#[test]
fn a_session_change_discards_the_pending_batch() {
    init_logging();
    let mut snap = snapshot(Some("alpha"), true, 3);
    snap.new_pages = vec![page("a")];
    // Batch is still pending (debounce armed) when the session flips.
    let (state, _) = update(started(), Msg::SnapshotArrived { snapshot: snap, now_ms: 10 });

    let (state, effects) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("beta"), true, 1),
            now_ms: 500,
        },
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::CancelFlush)));

    // A stray flush tick after the reset must not leak old-session records.
    let (state, _) = update(state, Msg::FlushDue { now_ms: 2_010 });
    assert!(state.view().pages.is_empty());
}

#[test]
fn the_completion_guard_rearms_on_session_change() {
    init_logging();
    let (state, _) = update(
        started(),
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("alpha"), true, 5),
            now_ms: 10,
        },
    );
    let (state, effects) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("alpha"), false, 5),
            now_ms: 5_010,
        },
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::Notify { .. })));

    // New session runs and completes: the notification fires again.
    let (state, _) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("beta"), true, 2),
            now_ms: 10_010,
        },
    );
    let (_state, effects) = update(
        state,
        Msg::SnapshotArrived {
            snapshot: snapshot(Some("beta"), false, 2),
            now_ms: 15_010,
        },
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::Notify { .. })));
}
