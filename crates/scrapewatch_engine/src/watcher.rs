use std::sync::{mpsc, Arc};
use std::thread;

use scrapewatch_core::{WatchConfig, WatchState};

use crate::driver::run_driver;
use crate::fetch::StatusFetcher;
use crate::notify::NotificationSink;
use crate::types::WatchEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Start,
    Stop,
}

/// Consumer-facing lifecycle handle.
///
/// Spawns one background thread running a current-thread tokio runtime with
/// the single driver task on it. Consumers poll [`WatchEvent`]s off the
/// handle; the accumulated state itself never leaves the driver, only
/// cloned views of it do.
pub struct WatcherHandle {
    cmd_tx: Option<tokio::sync::mpsc::Sender<Command>>,
    event_rx: mpsc::Receiver<WatchEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl WatcherHandle {
    pub fn new(
        config: WatchConfig,
        fetcher: Arc<dyn StatusFetcher>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel();

        let thread = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .enable_io()
                .build()
                .expect("tokio runtime");
            runtime.block_on(run_driver(
                WatchState::new(config),
                fetcher,
                sink,
                cmd_rx,
                event_tx,
            ));
        });

        Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            thread: Some(thread),
        }
    }

    /// Begins polling, or resumes it after a halt.
    pub fn start(&self) {
        if let Some(cmd_tx) = &self.cmd_tx {
            let _ = cmd_tx.blocking_send(Command::Start);
        }
    }

    /// Stops the driver and blocks until it has wound down. No timer fires
    /// and no event is delivered once this returns.
    pub fn stop(&mut self) {
        if let Some(cmd_tx) = &self.cmd_tx {
            let _ = cmd_tx.blocking_send(Command::Stop);
        }
        self.cmd_tx = None;
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn try_recv(&self) -> Option<WatchEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        // Closing the command channel stops the driver.
        self.cmd_tx = None;
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
