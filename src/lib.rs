mod utils;
mod amf;
mod protocol;
mod handshake;
mod chunk;
mod client;
mod bandwidth;

// Re-export commonly used types at crate root
pub use utils::*;
pub use amf::*;
pub use protocol::*;
pub use chunk::*;
pub use handshake::*;

// Client exports
pub use client::{
    bootstrap_session, connect_to_server, BandwidthTester, ClientConfig, ClientConfigBuilder,
    PublishSession, RtmpTarget,
};

// Measurement exports
pub use bandwidth::*;
