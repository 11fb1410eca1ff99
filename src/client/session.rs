use log::debug;
use tokio::io::AsyncWrite;
use crate::chunk::ChunkWriter;
use crate::client::config::ClientConfig;
use crate::client::target::RtmpTarget;
use crate::protocol::{
    set_chunk_size_payload, RtmpCommand, RtmpData, RtmpMessage, StreamMetadata,
    CREATE_STREAM_TRANSACTION_ID,
};
use crate::Result;

/// State left behind by a completed bootstrap
#[derive(Debug, Clone)]
pub struct PublishSession {
    /// Framing state at the negotiated chunk size
    pub chunk_writer: ChunkWriter,

    /// Stream the media is published on
    pub stream_id: u32,

    /// Bytes written during bootstrap
    pub bytes_written: usize,
}

/// Send set-chunk-size, connect, createStream, publish and onMetaData.
///
/// Nothing is read back: each message is written in full before the next
/// one, and any write failure ends the bootstrap.
pub async fn bootstrap_session<W>(
    writer: &mut W,
    target: &RtmpTarget,
    stream_key: &str,
    config: &ClientConfig,
) -> Result<PublishSession>
where
    W: AsyncWrite + Unpin,
{
    let mut chunk_writer = ChunkWriter::new(config.initial_chunk_size as usize)?;
    let stream_id = config.stream_id;
    let mut bytes_written = 0;

    let payload = set_chunk_size_payload(config.chunk_size);
    bytes_written += chunk_writer
        .write_message(writer, &RtmpMessage::set_chunk_size(&payload))
        .await
        .into_result()?;
    chunk_writer.set_chunk_size(config.chunk_size as usize)?;
    debug!("Set chunk size to {}", config.chunk_size);

    let payload = RtmpCommand::connect(&target.app, &target.tc_url, &config.flash_ver).encode()?;
    bytes_written += chunk_writer
        .write_message(writer, &RtmpMessage::command(&payload, 0))
        .await
        .into_result()?;
    debug!("Sent connect for app '{}'", target.app);

    let payload = RtmpCommand::create_stream(CREATE_STREAM_TRANSACTION_ID).encode()?;
    bytes_written += chunk_writer
        .write_message(writer, &RtmpMessage::command(&payload, 0))
        .await
        .into_result()?;
    debug!("Sent createStream");

    // The app name doubles as the publish type
    let payload = RtmpCommand::publish(stream_key, &target.app).encode()?;
    bytes_written += chunk_writer
        .write_message(writer, &RtmpMessage::command(&payload, stream_id))
        .await
        .into_result()?;
    debug!("Sent publish on stream {}", stream_id);

    let payload = RtmpData::on_metadata(&StreamMetadata::default()).encode()?;
    bytes_written += chunk_writer
        .write_message(writer, &RtmpMessage::data(&payload, stream_id))
        .await
        .into_result()?;
    debug!("Sent onMetaData");

    Ok(PublishSession {
        chunk_writer,
        stream_id,
        bytes_written,
    })
}
