// Common test utilities and helper functions
//
// A loopback fake server that completes the handshake and records every
// byte the client sends, plus a decoder for the recorded chunk stream.

#![allow(dead_code)]

use std::collections::HashMap;
use rtmp_tester::{ByteBuffer, HANDSHAKE_SIZE, SERVER_RESPONSE_SIZE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the fake server saw from one client
pub struct Recording {
    pub c0c1: Vec<u8>,
    pub c2: Vec<u8>,
    pub chunks: Vec<u8>,
}

/// Accept one connection, answer the handshake, record until EOF
pub async fn spawn_recording_server() -> (u16, JoinHandle<Recording>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let port = listener.local_addr().expect("local addr").port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");

        let mut c0c1 = vec![0u8; 1 + HANDSHAKE_SIZE];
        socket.read_exact(&mut c0c1).await.expect("read C0+C1");
        socket.write_all(&vec![0x03; SERVER_RESPONSE_SIZE]).await.expect("write S0+S1+S2");
        let mut c2 = vec![0u8; HANDSHAKE_SIZE];
        socket.read_exact(&mut c2).await.expect("read C2");

        let mut chunks = Vec::new();
        socket.read_to_end(&mut chunks).await.expect("read chunk stream");

        Recording { c0c1, c2, chunks }
    });

    (port, handle)
}

/// A reassembled message from the recorded stream
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub chunk_stream_id: u8,
    pub timestamp: u32,
    pub message_type: u8,
    pub stream_id: u32,
    pub payload: Vec<u8>,
}

struct Partial {
    message: ReceivedMessage,
    length: usize,
}

/// Reassemble messages written with full and continuation headers.
///
/// Tracks set-chunk-size so later messages are split at the new size.
/// A trailing message cut short by the end of the recording is dropped.
pub fn decode_messages(bytes: Vec<u8>) -> Vec<ReceivedMessage> {
    let mut buffer = ByteBuffer::new(bytes);
    let mut chunk_size = 128usize;
    let mut partial: HashMap<u8, Partial> = HashMap::new();
    let mut messages = Vec::new();

    while buffer.remaining() > 0 {
        let Ok(basic) = buffer.read_u8() else { break };
        let fmt = basic >> 6;
        let cs_id = basic & 0x3F;

        if fmt == 0 {
            if buffer.remaining() < 11 {
                break;
            }
            let timestamp = buffer.read_u24_be().unwrap();
            let length = buffer.read_u24_be().unwrap() as usize;
            let message_type = buffer.read_u8().unwrap();
            let stream_id = buffer.read_u32_le().unwrap();
            partial.insert(cs_id, Partial {
                message: ReceivedMessage {
                    chunk_stream_id: cs_id,
                    timestamp,
                    message_type,
                    stream_id,
                    payload: Vec::with_capacity(length),
                },
                length,
            });
        } else {
            assert_eq!(fmt, 3, "unexpected chunk format {}", fmt);
        }

        let entry = partial.get_mut(&cs_id).expect("continuation without a started message");
        let want = (entry.length - entry.message.payload.len()).min(chunk_size);
        let Ok(data) = buffer.read_bytes(want) else { break };
        entry.message.payload.extend_from_slice(&data);

        if entry.message.payload.len() == entry.length {
            let done = partial.remove(&cs_id).unwrap().message;
            if done.message_type == 1 {
                let size: [u8; 4] = done.payload[..4].try_into().unwrap();
                chunk_size = u32::from_be_bytes(size) as usize;
            }
            messages.push(done);
        }
    }

    messages
}

/// Length-prefixed AMF0 string as it appears on the wire
pub fn amf0_string(s: &str) -> Vec<u8> {
    let mut bytes = vec![0x02];
    bytes.extend_from_slice(&(s.len() as u16).to_be_bytes());
    bytes.extend_from_slice(s.as_bytes());
    bytes
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
