//! Top-level error type for the bot.
//!
//! Component errors (configuration, decoding, transport) convert into
//! [`BotError`] with `?`. Responder failures never reach this level; the
//! dispatcher contains them.

use marvin_proto::{ProtocolError, TransportError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a session or prevent it from starting.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl BotError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Protocol(_) => "protocol_error",
            Self::Transport(TransportError::ConnectionClosed) => "connection_closed",
            Self::Transport(_) => "transport_error",
        }
    }

    /// `true` when reconnecting may get the bot going again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            Self::Config(_) | Self::Protocol(_) => false,
        }
    }
}
