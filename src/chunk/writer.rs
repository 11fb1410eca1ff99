use std::io;
use std::num::NonZeroUsize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use crate::protocol::{ChunkStreamId, RtmpMessage, MAX_MEDIUM_VALUE};
use crate::{ByteBuffer, Error, Result};

/// Header format 0: full message header
pub const FMT_FULL: u8 = 0;
/// Header format 3: continuation, basic header only
pub const FMT_CONTINUATION: u8 = 3;

pub const BASIC_HEADER_LEN: usize = 1;
/// Type 0 message header: timestamp, length, type id, stream id
pub const MESSAGE_HEADER_LEN: usize = 11;
pub const FULL_HEADER_LEN: usize = BASIC_HEADER_LEN + MESSAGE_HEADER_LEN;
pub const CONTINUATION_HEADER_LEN: usize = BASIC_HEADER_LEN;

/// Encode the one-byte basic header
pub fn encode_basic_header(fmt: u8, cs_id: ChunkStreamId) -> u8 {
    (fmt << 6) | (cs_id.value() & 0x3F)
}

/// Split a message into wire chunks of at most `max_chunk_size` payload bytes.
///
/// The first chunk carries the full header, later ones a continuation
/// header on the same chunk stream. An empty payload yields no chunks.
/// Timestamps above the 24-bit field saturate to `0xFFFFFF`; no extended
/// timestamp is written.
pub fn serialize(message: &RtmpMessage<'_>, max_chunk_size: NonZeroUsize) -> Result<Vec<Vec<u8>>> {
    let payload = message.payload;
    if payload.len() > MAX_MEDIUM_VALUE as usize {
        return Err(Error::chunk(format!(
            "payload of {} bytes does not fit the 24-bit length field",
            payload.len()
        )));
    }

    let mut chunks = Vec::with_capacity(payload.len().div_ceil(max_chunk_size.get()));
    for (index, slice) in payload.chunks(max_chunk_size.get()).enumerate() {
        let chunk = if index == 0 {
            let mut buffer = ByteBuffer::with_capacity(FULL_HEADER_LEN + slice.len());
            buffer.write_u8(encode_basic_header(FMT_FULL, message.chunk_stream_id))?;
            buffer.write_u24_be(message.wire_timestamp())?;
            buffer.write_u24_be(payload.len() as u32)?;
            buffer.write_u8(message.message_type.code())?;
            buffer.write_u32_le(message.stream_id)?;
            buffer.write_bytes(slice)?;
            buffer.into_vec()
        } else {
            let mut chunk = Vec::with_capacity(CONTINUATION_HEADER_LEN + slice.len());
            chunk.push(encode_basic_header(FMT_CONTINUATION, message.chunk_stream_id));
            chunk.extend_from_slice(slice);
            chunk
        };
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Result of pushing bytes at a transport that may fail part-way.
///
/// `written` counts the bytes the transport accepted before `error`, if any.
#[derive(Debug)]
pub struct WriteOutcome {
    pub written: usize,
    pub error: Option<Error>,
}

impl WriteOutcome {
    fn failed(written: usize, error: impl Into<Error>) -> Self {
        WriteOutcome {
            written,
            error: Some(error.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Treat any failure as fatal
    pub fn into_result(self) -> Result<usize> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }
}

/// Write chunks in order, stopping at the first transport error
pub async fn write_chunks<W: AsyncWrite + Unpin>(writer: &mut W, chunks: &[Vec<u8>]) -> WriteOutcome {
    let mut written = 0;

    for chunk in chunks {
        let mut offset = 0;
        while offset < chunk.len() {
            match writer.write(&chunk[offset..]).await {
                Ok(0) => {
                    return WriteOutcome::failed(written, io::Error::from(io::ErrorKind::WriteZero));
                }
                Ok(n) => {
                    offset += n;
                    written += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return WriteOutcome::failed(written, e),
            }
        }
    }

    if let Err(e) = writer.flush().await {
        return WriteOutcome::failed(written, e);
    }

    WriteOutcome { written, error: None }
}

/// Outbound framing state for one connection: the negotiated chunk size.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    chunk_size_out: NonZeroUsize,
}

impl ChunkWriter {
    /// Create new chunk writer
    pub fn new(chunk_size: usize) -> Result<Self> {
        let chunk_size_out = NonZeroUsize::new(chunk_size)
            .ok_or_else(|| Error::chunk("chunk size must be greater than zero"))?;
        Ok(ChunkWriter { chunk_size_out })
    }

    /// Current outgoing chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size_out.get()
    }

    /// Switch to a new outgoing chunk size after announcing it to the peer
    pub fn set_chunk_size(&mut self, size: usize) -> Result<()> {
        self.chunk_size_out = NonZeroUsize::new(size)
            .ok_or_else(|| Error::chunk("chunk size must be greater than zero"))?;
        Ok(())
    }

    pub fn serialize(&self, message: &RtmpMessage<'_>) -> Result<Vec<Vec<u8>>> {
        serialize(message, self.chunk_size_out)
    }

    /// Frame and write one message
    pub async fn write_message<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
        message: &RtmpMessage<'_>,
    ) -> WriteOutcome {
        match self.serialize(message) {
            Ok(chunks) => write_chunks(writer, &chunks).await,
            Err(e) => WriteOutcome::failed(0, e),
        }
    }
}
