mod config;
mod session;
mod target;
mod tester;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use session::{bootstrap_session, PublishSession};
pub use target::RtmpTarget;
pub use tester::BandwidthTester;

use tokio::net::TcpStream;
use tokio::time::timeout;
use std::time::Duration;
use log::info;
use crate::{Error, Result};

pub async fn connect_to_server(addr: &str, connect_timeout: Duration) -> Result<TcpStream> {
    info!("Connecting to {}", addr);

    // Connect with timeout
    let stream = match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(Error::connection(format!("Connection to {} failed: {}", addr, e))),
        Err(_) => return Err(Error::timeout(format!("Connection to {} timed out", addr))),
    };

    stream.set_nodelay(true)?;
    Ok(stream)
}
