use std::time::Duration;
use crate::protocol::{DEFAULT_CHUNK_SIZE, DEFAULT_PORT, MAX_MEDIUM_VALUE};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Port used when the URL does not name one
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Chunk size in effect until set-chunk-size is sent
    pub initial_chunk_size: u32,

    /// Chunk size announced to the server and used afterwards
    pub chunk_size: u32,

    /// Message stream id assumed for the published stream
    pub stream_id: u32,

    /// Ceiling on the cumulative average bitrate
    pub max_bitrate_kbps: f64,

    /// Synthetic timestamp step per audio message
    pub frame_interval: Duration,

    /// Minimum spacing of bitrate samples in the log
    pub report_interval: Duration,

    /// Size of each synthetic audio message
    pub audio_payload_size: usize,

    /// Run length used when no duration is given
    pub unbounded_run: Duration,

    /// Client identification sent in connect
    pub flash_ver: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(10),
            initial_chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_size: 4096,
            stream_id: 1,
            max_bitrate_kbps: 10_000.0,
            frame_interval: Duration::from_millis(10),
            report_interval: Duration::from_secs(1),
            audio_payload_size: 4096,
            unbounded_run: Duration::from_secs(24 * 60 * 60),
            flash_ver: "FMLE/3.0 (compatible; FMSc/1.0)".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.initial_chunk_size == 0 || self.initial_chunk_size > 65536 {
            return Err(Error::config("Initial chunk size must be within 1..=65536"));
        }

        if self.chunk_size < 128 {
            return Err(Error::config("Chunk size must be at least 128"));
        }

        if self.chunk_size > 65536 {
            return Err(Error::config("Chunk size must not exceed 65536"));
        }

        if !(self.max_bitrate_kbps.is_finite() && self.max_bitrate_kbps > 0.0) {
            return Err(Error::config("Bitrate ceiling must be a positive number"));
        }

        if self.frame_interval.is_zero() || self.report_interval.is_zero() {
            return Err(Error::config("Frame and report intervals must be non-zero"));
        }

        if self.audio_payload_size < 2 || self.audio_payload_size > MAX_MEDIUM_VALUE as usize {
            return Err(Error::config("Audio payload must hold the codec header and fit 24 bits"));
        }

        Ok(())
    }

    /// Ceiling in bits per second
    pub fn max_bitrate_bps(&self) -> f64 {
        self.max_bitrate_kbps * 1000.0
    }

    /// Timestamp step in whole milliseconds
    pub fn frame_interval_ms(&self) -> u32 {
        self.frame_interval.as_millis().min(u32::MAX as u128) as u32
    }
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        ClientConfigBuilder::new()
    }
}

impl ClientConfigBuilder {
    /// Create new builder
    pub fn new() -> Self {
        ClientConfigBuilder {
            config: ClientConfig::default(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set negotiated chunk size
    pub fn chunk_size(mut self, size: u32) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn max_bitrate_kbps(mut self, kbps: f64) -> Self {
        self.config.max_bitrate_kbps = kbps;
        self
    }

    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.config.report_interval = interval;
        self
    }

    pub fn audio_payload_size(mut self, size: usize) -> Self {
        self.config.audio_payload_size = size;
        self
    }

    pub fn unbounded_run(mut self, run: Duration) -> Self {
        self.config.unbounded_run = run;
        self
    }

    /// Build configuration
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 1935);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.initial_chunk_size, 128);
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.max_bitrate_bps(), 10_000_000.0);
        assert_eq!(config.frame_interval_ms(), 10);
    }

    #[test]
    fn test_builder_validates() {
        assert!(ClientConfig::builder().chunk_size(64).build().is_err());
        assert!(ClientConfig::builder().chunk_size(70_000).build().is_err());
        assert!(ClientConfig::builder().max_bitrate_kbps(0.0).build().is_err());
        assert!(ClientConfig::builder().max_bitrate_kbps(f64::NAN).build().is_err());
        assert!(ClientConfig::builder().audio_payload_size(1).build().is_err());
        assert!(ClientConfig::builder().report_interval(Duration::ZERO).build().is_err());

        let config = ClientConfig::builder()
            .port(19350)
            .chunk_size(8192)
            .build()
            .unwrap();
        assert_eq!(config.port, 19350);
        assert_eq!(config.chunk_size, 8192);
    }
}
