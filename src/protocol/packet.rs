use std::fmt;
use crate::protocol::constants::*;
use crate::{Error, Result};

/// Message types this client sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    SetChunkSize,
    Audio,
    DataAmf0,
    CommandAmf0,
}

impl MessageType {
    /// Type id carried in the chunk message header
    pub fn code(self) -> u8 {
        match self {
            MessageType::SetChunkSize => MSG_TYPE_SET_CHUNK_SIZE,
            MessageType::Audio => MSG_TYPE_AUDIO,
            MessageType::DataAmf0 => MSG_TYPE_DATA_AMF0,
            MessageType::CommandAmf0 => MSG_TYPE_COMMAND_AMF0,
        }
    }
}

/// Chunk stream id in the one-byte basic header range.
///
/// Ids 0 and 1 are escape values for the longer basic header forms, which
/// this client never emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkStreamId(u8);

impl ChunkStreamId {
    pub const PROTOCOL: ChunkStreamId = ChunkStreamId(CHUNK_STREAM_PROTOCOL);
    pub const COMMAND: ChunkStreamId = ChunkStreamId(CHUNK_STREAM_COMMAND);
    pub const AUDIO: ChunkStreamId = ChunkStreamId(CHUNK_STREAM_AUDIO);

    pub fn new(id: u8) -> Result<Self> {
        if !(2..=63).contains(&id) {
            return Err(Error::chunk(format!(
                "chunk stream id {} does not fit a one-byte basic header",
                id
            )));
        }
        Ok(ChunkStreamId(id))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChunkStreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical protocol message, borrowed for the duration of a send.
#[derive(Debug, Clone, Copy)]
pub struct RtmpMessage<'a> {
    pub chunk_stream_id: ChunkStreamId,
    pub message_type: MessageType,
    pub stream_id: u32,
    pub timestamp: u32,
    pub payload: &'a [u8],
}

impl<'a> RtmpMessage<'a> {
    /// Create new message
    pub fn new(
        chunk_stream_id: ChunkStreamId,
        message_type: MessageType,
        stream_id: u32,
        timestamp: u32,
        payload: &'a [u8],
    ) -> Self {
        RtmpMessage {
            chunk_stream_id,
            message_type,
            stream_id,
            timestamp,
            payload,
        }
    }

    /// Protocol control message on the control lane
    pub fn set_chunk_size(payload: &'a [u8]) -> Self {
        RtmpMessage::new(ChunkStreamId::PROTOCOL, MessageType::SetChunkSize, 0, 0, payload)
    }

    /// AMF0 command on the command lane
    pub fn command(payload: &'a [u8], stream_id: u32) -> Self {
        RtmpMessage::new(ChunkStreamId::COMMAND, MessageType::CommandAmf0, stream_id, 0, payload)
    }

    /// AMF0 data message; shares the command lane
    pub fn data(payload: &'a [u8], stream_id: u32) -> Self {
        RtmpMessage::new(ChunkStreamId::COMMAND, MessageType::DataAmf0, stream_id, 0, payload)
    }

    /// Audio frame on the media lane
    pub fn audio(payload: &'a [u8], stream_id: u32, timestamp: u32) -> Self {
        RtmpMessage::new(ChunkStreamId::AUDIO, MessageType::Audio, stream_id, timestamp, payload)
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Timestamp as written in the 3-byte header field
    pub fn wire_timestamp(&self) -> u32 {
        self.timestamp.min(MAX_MEDIUM_VALUE)
    }
}

/// Payload of a set-chunk-size control message
pub fn set_chunk_size_payload(size: u32) -> [u8; 4] {
    // Top bit is reserved and must be zero
    (size & 0x7FFF_FFFF).to_be_bytes()
}

/// Synthetic AAC frame: codec marker, raw-frame marker, then filler
pub fn synthetic_audio_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![AUDIO_FILLER; size];
    if let Some(first) = payload.get_mut(0) {
        *first = AUDIO_TAG_AAC;
    }
    if let Some(second) = payload.get_mut(1) {
        *second = AAC_PACKET_RAW;
    }
    payload
}
