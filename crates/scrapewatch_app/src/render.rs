//! Console rendering of watch events.

use scrapewatch_core::SessionView;
use scrapewatch_engine::WatchEvent;

use crate::prefs::ViewMode;

pub fn render_event(event: &WatchEvent, mode: ViewMode) {
    match event {
        WatchEvent::StateChanged(view) => render_state(view, mode),
        WatchEvent::RateUpdated { rate, eta_seconds } => render_rate(*rate, *eta_seconds),
        WatchEvent::PollFailed { error } => println!("! poll failed: {error}"),
        WatchEvent::Halted => println!("-- crawl idle, polling stopped --"),
    }
}

fn render_state(view: &SessionView, mode: ViewMode) {
    let session = view.session_id.as_deref().unwrap_or("-");
    let status = match (view.running, view.paused) {
        (true, true) => "paused",
        (true, false) => "running",
        (false, _) => "idle",
    };
    println!(
        "[{session}] {status}  {}/{} pages  queue {}",
        view.pages_scraped, view.max_pages, view.queue_size
    );

    match mode {
        ViewMode::Summary => {
            if !view.file_type_counts.is_empty() {
                let counts: Vec<String> = view
                    .file_type_counts
                    .iter()
                    .map(|(ext, n)| format!("{ext}:{n}"))
                    .collect();
                println!("  files by type: {}", counts.join("  "));
            }
        }
        ViewMode::Pages => {
            // Only the tail; the full list grows without bound.
            for page in view.pages.iter().rev().take(10).rev() {
                println!("  [{}] {}  {}", page.depth, page.url, page.title);
            }
        }
        ViewMode::Files => {
            for file in view.files.iter().rev().take(10).rev() {
                println!(
                    "  {}  {} bytes  via {}",
                    file.file_name, file.size_bytes, file.page_url
                );
            }
        }
    }
}

fn render_rate(rate: Option<f64>, eta_seconds: Option<f64>) {
    match (rate, eta_seconds) {
        (Some(rate), Some(eta)) => println!("  {rate:.2} pages/s, ~{eta:.0}s remaining"),
        (Some(rate), None) => println!("  {rate:.2} pages/s"),
        (None, _) => {}
    }
}
