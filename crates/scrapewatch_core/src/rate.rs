use std::collections::VecDeque;

/// One throughput observation, kept for trend display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    pub at_ms: u64,
    pub rate: f64,
}

/// Result of a single rate observation. `None` means "unknown" (nothing
/// scraped yet, or no elapsed time); rendering a placeholder is the
/// consumer's business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateReading {
    pub rate: Option<f64>,
    pub eta_seconds: Option<f64>,
}

/// Cumulative-average throughput estimator for the currently running job.
///
/// The rate is `scraped / elapsed` since the first active snapshot, not an
/// instantaneous delta, which smooths bursty arrival patterns. A bounded
/// window of samples is retained so consumers can chart the trend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateEstimator {
    started_at_ms: Option<u64>,
    samples: VecDeque<RateSample>,
}

impl RateEstimator {
    /// Folds in one active snapshot. The first call pins `started_at`.
    pub fn observe(&mut self, scraped: u64, max: u64, now_ms: u64, window: usize) -> RateReading {
        let started = *self.started_at_ms.get_or_insert(now_ms);
        let elapsed_seconds = now_ms.saturating_sub(started) as f64 / 1000.0;
        if elapsed_seconds <= 0.0 {
            return RateReading {
                rate: None,
                eta_seconds: None,
            };
        }

        let rate = scraped as f64 / elapsed_seconds;
        self.samples.push_back(RateSample { at_ms: now_ms, rate });
        while self.samples.len() > window {
            self.samples.pop_front();
        }

        let remaining = max.saturating_sub(scraped);
        let eta_seconds = if rate > 0.0 && remaining > 0 {
            Some(remaining as f64 / rate)
        } else {
            None
        };
        RateReading {
            rate: Some(rate),
            eta_seconds,
        }
    }

    /// True once an active snapshot has pinned `started_at`.
    pub fn is_tracking(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn samples(&self) -> impl Iterator<Item = &RateSample> {
        self.samples.iter()
    }

    /// Forgets the current job. Rate and ETA describe only a running job,
    /// so completion and session changes both clear the estimator.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
