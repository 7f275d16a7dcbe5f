//! Byte-stream transport to the IRC server.
//!
//! - [`Transport`]: the send/receive contract the bot's event loop is written against
//! - [`TcpTransport`]: plain (non-TLS) TCP implementation
//!
//! Writes are not retried and errors are surfaced to the caller. Every
//! outbound line is traced at `info` so an operator can follow the session.

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::TcpTransport;

use async_trait::async_trait;
use bytes::Bytes;

/// Read size used when the caller has no preference.
pub const DEFAULT_READ_SIZE: usize = 2048;

/// A connected, bidirectional byte stream.
#[async_trait]
pub trait Transport: Send {
    /// Write `text` exactly as given. The caller supplies the CRLF.
    async fn send(&mut self, text: &str) -> Result<(), TransportError>;

    /// Wait for at least one byte, returning up to `max_bytes`.
    ///
    /// Returns [`TransportError::ConnectionClosed`] once the peer hangs up.
    async fn receive(&mut self, max_bytes: usize) -> Result<Bytes, TransportError>;
}
