//! Error types for the protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Protocol-level errors.
///
/// Decoding itself never fails; these only surface when a decoder is
/// constructed from a bad configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// An encoding label that no known decoder answers to.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}
