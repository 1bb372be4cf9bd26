mod logging;
mod prefs;
mod render;

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use watch_logging::watch_info;

use scrapewatch_core::WatchConfig;
use scrapewatch_engine::{
    FetchSettings, HttpStatusFetcher, LogNotificationSink, WatchEvent, WatcherHandle,
};

use crate::logging::LogDestination;
use crate::prefs::ViewMode;

/// Console monitor for a crawl status endpoint.
#[derive(Debug, Parser)]
#[command(name = "scrapewatch")]
struct Cli {
    /// Status endpoint URL, e.g. http://localhost:8080/api/status
    url: String,

    /// Override the active poll interval in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Which collection to render; remembered for the next run.
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "terminal")]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let prefs_dir = Path::new(".");
    let mut prefs = prefs::load(prefs_dir);
    if let Some(view) = cli.view {
        if prefs.view_mode != view {
            prefs.view_mode = view;
            prefs::save(prefs_dir, &prefs);
        }
    }

    let mut config = WatchConfig::default();
    if let Some(interval_ms) = cli.interval_ms {
        config.active_poll_ms = interval_ms;
    }

    let fetcher =
        HttpStatusFetcher::new(&cli.url, FetchSettings::default()).context("status endpoint")?;

    watch_info!(
        "scrapewatch started at {} against {}",
        Utc::now().to_rfc3339(),
        cli.url
    );

    let mut handle = WatcherHandle::new(config, Arc::new(fetcher), Arc::new(LogNotificationSink));
    handle.start();

    loop {
        match handle.try_recv() {
            Some(WatchEvent::Halted) => {
                render::render_event(&WatchEvent::Halted, prefs.view_mode);
                break;
            }
            Some(event) => render::render_event(&event, prefs.view_mode),
            None => thread::sleep(Duration::from_millis(20)),
        }
    }

    handle.stop();
    Ok(())
}
