use log::info;
use tokio::io::{AsyncRead, AsyncWrite};
use crate::bandwidth::{RateGovernedSender, TestResult, TokioClock};
use crate::client::config::ClientConfig;
use crate::client::connect_to_server;
use crate::client::session::bootstrap_session;
use crate::client::target::RtmpTarget;
use crate::handshake::perform_client_handshake;
use crate::Result;

/// Connects, publishes and measures sustained upload throughput.
pub struct BandwidthTester {
    /// Client configuration
    config: ClientConfig,
}

impl Default for BandwidthTester {
    fn default() -> Self {
        BandwidthTester::new()
    }
}

impl BandwidthTester {
    /// Create new tester
    pub fn new() -> Self {
        BandwidthTester {
            config: ClientConfig::default(),
        }
    }

    /// Create tester with config, rejecting values the sender cannot run with
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(BandwidthTester { config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full test against `url`: dial, handshake, bootstrap, send.
    ///
    /// A duration of 0 runs until `unbounded_run` elapses; a negative one
    /// completes setup and sends nothing. Setup failures are returned as errors; once sending starts the test
    /// always produces a result. The connection is closed on return.
    pub async fn run(&self, url: &str, stream_key: &str, duration_secs: i64) -> Result<TestResult> {
        let target = RtmpTarget::parse(url)?;
        info!("Server {}, app '{}'", target.host, target.app);

        let mut stream = connect_to_server(&target.address(self.config.port), self.config.connect_timeout).await?;
        self.run_on(&mut stream, &target, stream_key, duration_secs).await
    }

    /// Same as `run` over an already connected transport
    pub async fn run_on<S>(
        &self,
        stream: &mut S,
        target: &RtmpTarget,
        stream_key: &str,
        duration_secs: i64,
    ) -> Result<TestResult>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("Starting handshake...");
        perform_client_handshake(stream).await?;

        let session = bootstrap_session(stream, target, stream_key, &self.config).await?;
        info!(
            "Publishing '{}' on stream {} ({} bootstrap bytes)",
            stream_key, session.stream_id, session.bytes_written
        );

        let sender = RateGovernedSender::new(&self.config, TokioClock);
        let result = sender
            .run(stream, &session.chunk_writer, session.stream_id, duration_secs)
            .await;

        info!(
            "Sent {} bytes in {:.2?} ({:.2} kbps)",
            result.bytes_count, result.test_time, result.avg_bitrate_kbps
        );
        if let Some(quality) = result.quality_percent(self.config.max_bitrate_kbps) {
            info!("Quality {:.2}% of the {} kbps target", quality, self.config.max_bitrate_kbps);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_with_config_validates() {
        let config = ClientConfig {
            max_bitrate_kbps: 0.0,
            ..ClientConfig::default()
        };
        assert!(matches!(BandwidthTester::with_config(config), Err(Error::Configuration(_))));

        let config = ClientConfig {
            chunk_size: 0,
            ..ClientConfig::default()
        };
        assert!(BandwidthTester::with_config(config).is_err());

        let tester = BandwidthTester::with_config(ClientConfig::default()).unwrap();
        assert_eq!(tester.config().chunk_size, 4096);
    }
}
