use crate::utils::current_timestamp_secs;

/// RTMP version
pub const RTMP_VERSION: u8 = 3;

/// Handshake packet size (C1/S1/C2/S2)
pub const HANDSHAKE_SIZE: usize = 1536;

/// S0 + S1 + S2 as sent back by the server
pub const SERVER_RESPONSE_SIZE: usize = 1 + HANDSHAKE_SIZE * 2;

/// Client opening (C0 + C1)
#[derive(Debug, Clone, PartialEq)]
pub struct C0C1 {
    /// RTMP version (C0)
    pub version: u8,

    /// Epoch in Unix seconds (first four bytes of C1)
    pub timestamp: u32,
}

impl C0C1 {
    /// Create C0+C1 stamped with the current time
    pub fn create_client() -> Self {
        C0C1::with_timestamp(current_timestamp_secs())
    }

    pub fn with_timestamp(timestamp: u32) -> Self {
        C0C1 {
            version: RTMP_VERSION,
            timestamp,
        }
    }

    /// C1 block: big-endian timestamp, zero-filled remainder.
    ///
    /// The same block is echoed back as C2.
    pub fn c1(&self) -> Vec<u8> {
        let mut block = vec![0u8; HANDSHAKE_SIZE];
        block[..4].copy_from_slice(&self.timestamp.to_be_bytes());
        block
    }

    /// Encode to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(1 + HANDSHAKE_SIZE);
        result.push(self.version);
        result.extend_from_slice(&self.c1());
        result
    }
}
