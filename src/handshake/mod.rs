mod state;
mod c0c1;

pub use state::*;
pub use c0c1::*;

use log::{debug, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use crate::{Error, Result};

/// Client side of the simple handshake.
///
/// The server's S1/S2 blocks are read and discarded without validation.
#[derive(Debug)]
pub struct ClientHandshake {
    c0c1: C0C1,
    state: HandshakeState,
}

impl ClientHandshake {
    pub fn new(c0c1: C0C1) -> Self {
        ClientHandshake {
            c0c1,
            state: HandshakeState::new(),
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Run C0/C1 -> S0/S1/S2 -> C2 to completion
    pub async fn perform<S>(&mut self, stream: &mut S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let result = self.exchange(stream).await;
        if result.is_err() {
            self.state.transition(HandshakeEvent::Error)?;
        }
        result
    }

    async fn exchange<S>(&mut self, stream: &mut S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let c1 = self.c0c1.c1();

        stream.write_all(&[self.c0c1.version]).await
            .map_err(|e| Error::handshake(format!("Failed to send C0: {}", e)))?;
        stream.write_all(&c1).await
            .map_err(|e| Error::handshake(format!("Failed to send C1: {}", e)))?;
        stream.flush().await
            .map_err(|e| Error::handshake(format!("Failed to flush C0+C1: {}", e)))?;
        self.state.transition(HandshakeEvent::SentC0C1)?;
        debug!("Sent C0+C1 (epoch {})", self.c0c1.timestamp);

        let mut response = vec![0u8; SERVER_RESPONSE_SIZE];
        stream.read_exact(&mut response).await
            .map_err(|e| Error::handshake(format!("Failed to read S0+S1+S2: {}", e)))?;
        self.state.transition(HandshakeEvent::ReceivedS0S1S2)?;
        debug!("Received S0+S1+S2 (server version {})", response[0]);

        stream.write_all(&c1).await
            .map_err(|e| Error::handshake(format!("Failed to send C2: {}", e)))?;
        stream.flush().await
            .map_err(|e| Error::handshake(format!("Failed to flush C2: {}", e)))?;
        self.state.transition(HandshakeEvent::SentC2)?;
        info!("Handshake complete");

        Ok(())
    }
}

/// Perform the client handshake with a freshly stamped C1
pub async fn perform_client_handshake<S>(stream: &mut S) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    ClientHandshake::new(C0C1::create_client()).perform(stream).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_handshake_exchange() {
        let (mut client, mut server) = duplex(16 * 1024);

        let server_task = tokio::spawn(async move {
            let mut c0c1 = vec![0u8; 1 + HANDSHAKE_SIZE];
            server.read_exact(&mut c0c1).await.unwrap();
            server.write_all(&vec![0x03; SERVER_RESPONSE_SIZE]).await.unwrap();
            let mut c2 = vec![0u8; HANDSHAKE_SIZE];
            server.read_exact(&mut c2).await.unwrap();
            (c0c1, c2)
        });

        let mut handshake = ClientHandshake::new(C0C1::with_timestamp(0x5F00_0001));
        handshake.perform(&mut client).await.unwrap();
        assert!(handshake.state().is_done());

        let (c0c1, c2) = server_task.await.unwrap();
        assert_eq!(c0c1[0], RTMP_VERSION);
        assert_eq!(&c0c1[1..5], &0x5F00_0001u32.to_be_bytes());
        assert!(c0c1[5..].iter().all(|&b| b == 0));
        assert_eq!(&c0c1[1..], &c2[..]);
    }

    #[tokio::test]
    async fn test_short_server_response_fails() {
        let (mut client, mut server) = duplex(16 * 1024);

        tokio::spawn(async move {
            let mut c0c1 = vec![0u8; 1 + HANDSHAKE_SIZE];
            server.read_exact(&mut c0c1).await.unwrap();
            server.write_all(&[0x03; 100]).await.unwrap();
            // Dropping the server end truncates the response
        });

        let mut handshake = ClientHandshake::new(C0C1::create_client());
        let err = handshake.perform(&mut client).await.unwrap_err();
        assert!(matches!(err, Error::Handshake(_)));
        assert!(handshake.state().is_failed());
    }
}
