use url::Url;
use crate::protocol::DEFAULT_APP;
use crate::{Error, Result};

/// Server and application a test publishes to
#[derive(Debug, Clone, PartialEq)]
pub struct RtmpTarget {
    pub host: String,
    /// Explicit port from the URL, if any
    pub port: Option<u16>,
    pub app: String,
    /// The URL as given, sent back to the server as tcUrl
    pub tc_url: String,
}

impl RtmpTarget {
    /// Parse `rtmp://host[:port]/app[/...]`.
    ///
    /// The app is the first path segment only; an empty path means `live`.
    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| Error::invalid_url(format!("failed to parse {}: {}", url, e)))?;

        let host = parsed.host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::invalid_url(format!("missing host in {}", url)))?;

        let app = parsed.path()
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_APP);

        Ok(RtmpTarget {
            host: host.to_string(),
            port: parsed.port(),
            app: app.to_string(),
            tc_url: url.to_string(),
        })
    }

    /// `host:port` to dial, falling back to `default_port`
    pub fn address(&self, default_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(default_port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_segment_is_app() {
        let target = RtmpTarget::parse("rtmp://example.com/live/abc").unwrap();
        assert_eq!(target.host, "example.com");
        assert_eq!(target.app, "live");
        assert_eq!(target.port, None);
        assert_eq!(target.tc_url, "rtmp://example.com/live/abc");
        assert_eq!(target.address(1935), "example.com:1935");
    }

    #[test]
    fn test_empty_path_defaults_to_live() {
        assert_eq!(RtmpTarget::parse("rtmp://example.com/").unwrap().app, "live");
        assert_eq!(RtmpTarget::parse("rtmp://example.com").unwrap().app, "live");
    }

    #[test]
    fn test_single_segment() {
        let target = RtmpTarget::parse("rtmp://ingest.example.net/app").unwrap();
        assert_eq!(target.app, "app");
    }

    #[test]
    fn test_query_kept_in_tc_url() {
        let url = "rtmp://ingest.example.net/app/SOMEKEY?bandwidthtest";
        let target = RtmpTarget::parse(url).unwrap();
        assert_eq!(target.app, "app");
        assert_eq!(target.tc_url, url);
    }

    #[test]
    fn test_explicit_port() {
        let target = RtmpTarget::parse("rtmp://127.0.0.1:19350/live").unwrap();
        assert_eq!(target.port, Some(19350));
        assert_eq!(target.address(1935), "127.0.0.1:19350");
    }

    #[test]
    fn test_missing_host_rejected() {
        assert!(matches!(RtmpTarget::parse("rtmp:live/abc"), Err(Error::InvalidUrl(_))));
        assert!(matches!(RtmpTarget::parse("not a url"), Err(Error::InvalidUrl(_))));
    }
}
