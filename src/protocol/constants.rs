// Message types
pub const MSG_TYPE_SET_CHUNK_SIZE: u8 = 1;
pub const MSG_TYPE_AUDIO: u8 = 8;
pub const MSG_TYPE_DATA_AMF0: u8 = 18;
pub const MSG_TYPE_COMMAND_AMF0: u8 = 20;

// Chunk stream IDs
pub const CHUNK_STREAM_PROTOCOL: u8 = 2;
pub const CHUNK_STREAM_COMMAND: u8 = 3;
pub const CHUNK_STREAM_AUDIO: u8 = 5;

// Default values
pub const DEFAULT_PORT: u16 = 1935;
pub const DEFAULT_CHUNK_SIZE: u32 = 128;
pub const DEFAULT_APP: &str = "live";

/// Largest value the 24-bit timestamp and length fields can carry
pub const MAX_MEDIUM_VALUE: u32 = 0x00FF_FFFF;

/// Sound format byte: AAC, 44.1 kHz, 16-bit, stereo
pub const AUDIO_TAG_AAC: u8 = 0xAF;
/// AAC packet type: raw frame
pub const AAC_PACKET_RAW: u8 = 0x01;
pub const AUDIO_FILLER: u8 = 0xDE;
