use std::time::Duration;
use serde::{Serialize, Serializer};
use crate::bandwidth::governor::average_bps;
use crate::Result;

/// Summary of one send loop, produced once at exit.
///
/// Serializes to the flat record downstream tooling parses:
/// `TestTime` (nanoseconds), `BytesCount`, `AvgBitrate` (kbps), `Success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    #[serde(rename = "TestTime", serialize_with = "serialize_nanos")]
    pub test_time: Duration,

    #[serde(rename = "BytesCount")]
    pub bytes_count: u64,

    #[serde(rename = "AvgBitrate")]
    pub avg_bitrate_kbps: f64,

    #[serde(rename = "Success")]
    pub success: bool,
}

fn serialize_nanos<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_nanos().min(u64::MAX as u128) as u64)
}

impl TestResult {
    /// A zero elapsed time cannot yield a bitrate and marks the run failed
    pub fn from_measurement(bytes_count: u64, test_time: Duration) -> Self {
        match average_bps(bytes_count, test_time) {
            Some(bps) => TestResult {
                test_time,
                bytes_count,
                avg_bitrate_kbps: bps / 1000.0,
                success: true,
            },
            None => TestResult {
                test_time,
                bytes_count,
                avg_bitrate_kbps: 0.0,
                success: false,
            },
        }
    }

    /// Achieved average as a percentage of `target_kbps`, the figure
    /// ingest servers are ranked by
    pub fn quality_percent(&self, target_kbps: f64) -> Option<f64> {
        (self.success && target_kbps > 0.0).then(|| self.avg_bitrate_kbps / target_kbps * 100.0)
    }
}

/// Render the result as two-space indented JSON
pub fn render_report(result: &TestResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
