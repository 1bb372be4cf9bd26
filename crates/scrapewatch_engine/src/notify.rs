use scrapewatch_core::NotifyPermission;
use watch_logging::watch_info;

/// Boundary to the host's notification facility.
pub trait NotificationSink: Send + Sync {
    /// Queried once when polling starts; never re-checked mid-session.
    fn permission(&self) -> NotifyPermission;

    /// Fire-and-forget delivery. No other component depends on it.
    fn notify(&self, title: &str, body: &str);
}

/// Default sink for headless consumers: completions land in the log.
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn permission(&self) -> NotifyPermission {
        NotifyPermission::Granted
    }

    fn notify(&self, title: &str, body: &str) {
        watch_info!("{title}: {body}");
    }
}
