use std::time::{Duration, Instant};
use log::{debug, info, warn};
use tokio::io::AsyncWrite;
use crate::bandwidth::clock::Clock;
use crate::bandwidth::governor::{BitrateGovernor, RateWindow};
use crate::bandwidth::result::TestResult;
use crate::chunk::ChunkWriter;
use crate::client::ClientConfig;
use crate::protocol::{synthetic_audio_payload, RtmpMessage};

/// Pushes synthetic audio for a fixed time under a bitrate ceiling.
pub struct RateGovernedSender<C: Clock> {
    clock: C,
    governor: BitrateGovernor,
    frame_interval_ms: u32,
    report_interval: Duration,
    audio_payload_size: usize,
    unbounded_run: Duration,
}

impl<C: Clock> RateGovernedSender<C> {
    pub fn new(config: &ClientConfig, clock: C) -> Self {
        RateGovernedSender {
            clock,
            governor: BitrateGovernor::new(config.max_bitrate_bps()),
            frame_interval_ms: config.frame_interval_ms(),
            report_interval: config.report_interval,
            audio_payload_size: config.audio_payload_size,
            unbounded_run: config.unbounded_run,
        }
    }

    /// Run length for a requested duration.
    ///
    /// Zero means "until stopped" and a negative duration means no sending
    /// at all.
    pub fn run_length(&self, duration_secs: i64) -> Duration {
        match duration_secs {
            0 => self.unbounded_run,
            d if d < 0 => Duration::ZERO,
            d => Duration::from_secs(d as u64),
        }
    }

    /// Loop deadline; lengths past what `Instant` can hold fall back to
    /// the unbounded run
    fn deadline(&self, start: Instant, duration_secs: i64) -> Instant {
        start
            .checked_add(self.run_length(duration_secs))
            .or_else(|| start.checked_add(self.unbounded_run))
            .unwrap_or(start)
    }

    /// Send until the deadline passes and summarize what went out.
    ///
    /// Write errors never end the loop; only the bytes the transport
    /// accepted are counted.
    pub async fn run<W>(
        &self,
        writer: &mut W,
        chunk_writer: &ChunkWriter,
        stream_id: u32,
        duration_secs: i64,
    ) -> TestResult
    where
        W: AsyncWrite + Unpin,
    {
        let payload = synthetic_audio_payload(self.audio_payload_size);
        let start = self.clock.now();
        let end = self.deadline(start, duration_secs);
        let mut window = RateWindow::new(start);
        let mut timestamp: u32 = 0;

        while self.clock.now() < end {
            let message = RtmpMessage::audio(&payload, stream_id, timestamp);
            let outcome = chunk_writer.write_message(writer, &message).await;
            window.record(outcome.written);
            if let Some(err) = outcome.error {
                debug!("Audio write short by error after {} bytes: {}", outcome.written, err);
            }
            timestamp = timestamp.wrapping_add(self.frame_interval_ms);

            let elapsed = window.elapsed(self.clock.now());
            if let Some(delay) = self.governor.throttle_delay(window.bytes_sent(), elapsed) {
                self.clock.sleep(delay).await;
            }

            let now = self.clock.now();
            if window.report_due(now, self.report_interval) {
                if let Some(bps) = window.average_bps(now) {
                    info!("Current bitrate: {:.2} kbps", bps / 1000.0);
                }
                window.mark_reported(now);
            }
        }

        let elapsed = window.elapsed(self.clock.now());
        let result = TestResult::from_measurement(window.bytes_sent(), elapsed);
        if !result.success {
            warn!("Elapsed time too short to measure bitrate");
        }
        result
    }
}
