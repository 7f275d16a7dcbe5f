//! Plain TCP transport.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{info, warn};

use super::{Transport, TransportError};

/// TCP connection to an IRC server.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    peer: String,
}

impl TcpTransport {
    /// Dial `host:port`.
    ///
    /// Fails with [`TransportError::MissingAddress`] when the host is blank or
    /// the port is zero, and [`TransportError::Connect`] when the server
    /// cannot be reached.
    pub async fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let host = host.trim();
        if host.is_empty() || port == 0 {
            return Err(TransportError::MissingAddress);
        }

        let addr = format!("{host}:{port}");
        info!(addr = %addr, "Connecting");
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| TransportError::Connect {
                addr: addr.clone(),
                source,
            })?;

        Ok(Self::from_stream(stream, addr))
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream, peer: impl Into<String>) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }
        Self {
            stream,
            peer: peer.into(),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
        use socket2::{SockRef, TcpKeepalive};

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)
    }

    /// The `host:port` this transport talks to.
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        info!("SEND: {}", text.trim_end_matches(&['\r', '\n'][..]));
        self.stream.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn receive(&mut self, max_bytes: usize) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::with_capacity(max_bytes.max(1));
        let n = self.stream.read_buf(&mut buf).await?;
        if n == 0 {
            return Err(TransportError::ConnectionClosed);
        }
        Ok(buf.freeze())
    }
}
