//! Transport error types.

use thiserror::Error;

/// Errors raised by a [`super::Transport`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Host or port missing from the connection request.
    #[error("missing server or port")]
    MissingAddress,

    /// The TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// `host:port` that was dialled.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// A read or write on an established connection failed.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection.
    #[error("connection closed by peer")]
    ConnectionClosed,
}

impl TransportError {
    /// `true` for errors where dialling again may help.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TransportError::MissingAddress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let transport_err: TransportError = io_err.into();

        assert!(matches!(transport_err, TransportError::Io(_)));
        assert_eq!(transport_err.to_string(), "transport I/O error: broken pipe");
        assert!(transport_err.is_recoverable());
    }

    #[test]
    fn test_missing_address_is_not_recoverable() {
        assert!(!TransportError::MissingAddress.is_recoverable());
    }
}
