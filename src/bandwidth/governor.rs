use std::time::{Duration, Instant};

/// Bits per second averaged over `elapsed`; `None` when nothing has elapsed
pub fn average_bps(bytes: u64, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        Some(bytes as f64 * 8.0 / secs)
    } else {
        None
    }
}

/// Caps the cumulative average bitrate of a transfer.
///
/// Stateless between calls: every decision is recomputed from the total byte
/// count and the total elapsed time. It only ever delays, never speeds up.
#[derive(Debug, Clone, Copy)]
pub struct BitrateGovernor {
    ceiling_bps: f64,
}

impl BitrateGovernor {
    pub fn new(ceiling_bps: f64) -> Self {
        BitrateGovernor { ceiling_bps }
    }

    pub fn from_kbps(ceiling_kbps: f64) -> Self {
        BitrateGovernor::new(ceiling_kbps * 1000.0)
    }

    pub fn ceiling_bps(&self) -> f64 {
        self.ceiling_bps
    }

    /// Pause needed for the average to fall back to the ceiling.
    ///
    /// `None` when the average is within the ceiling, no time has elapsed,
    /// or the ceiling is not a positive number.
    pub fn throttle_delay(&self, sent_bytes: u64, elapsed: Duration) -> Option<Duration> {
        if !(self.ceiling_bps.is_finite() && self.ceiling_bps > 0.0) {
            return None;
        }
        let average = average_bps(sent_bytes, elapsed)?;
        if average <= self.ceiling_bps {
            return None;
        }

        let budget_bytes = (self.ceiling_bps * elapsed.as_secs_f64() / 8.0) as u64;
        if sent_bytes <= budget_bytes {
            return None;
        }

        let excess_bits = (sent_bytes - budget_bytes) as f64 * 8.0;
        let delay = Duration::try_from_secs_f64(excess_bits / self.ceiling_bps).ok()?;
        (!delay.is_zero()).then_some(delay)
    }
}

/// Counters for one send loop
#[derive(Debug, Clone)]
pub struct RateWindow {
    start: Instant,
    last_report: Instant,
    bytes_sent: u64,
}

impl RateWindow {
    pub fn new(start: Instant) -> Self {
        RateWindow {
            start,
            last_report: start,
            bytes_sent: 0,
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    pub fn record(&mut self, bytes: usize) {
        self.bytes_sent = self.bytes_sent.saturating_add(bytes as u64);
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    pub fn average_bps(&self, now: Instant) -> Option<f64> {
        average_bps(self.bytes_sent, self.elapsed(now))
    }

    /// True once `interval` has passed since the last report
    pub fn report_due(&self, now: Instant, interval: Duration) -> bool {
        now.saturating_duration_since(self.last_report) >= interval
    }

    pub fn mark_reported(&mut self, now: Instant) {
        self.last_report = now;
    }
}
