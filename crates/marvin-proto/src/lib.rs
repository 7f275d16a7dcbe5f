//! # marvin-proto
//!
//! The protocol half of the marvin IRC bot: turning a raw byte stream into
//! discrete IRC lines and sending commands back over a TCP connection.
//!
//! ## Features
//!
//! - Line decoding with an encoding fallback chain that never fails
//! - Bounds-checked positional token access over decoded lines
//! - Outbound command construction and wire serialization
//! - Optional Tokio integration for the TCP transport
//!
//! ## Quick Start
//!
//! ```rust
//! use marvin_proto::{Command, LineDecoder};
//!
//! let mut decoder = LineDecoder::utf8();
//! let lines: Vec<_> = decoder.feed(b"PING :irc.example.net\r\nPRIV").collect();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].token(0), Some("PING"));
//!
//! let pong = Command::Pong("irc.example.net".to_string());
//! assert_eq!(pong.to_wire(), "PONG irc.example.net\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod line;
pub mod token;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::command::Command;
pub use self::error::{ProtocolError, Result};
pub use self::line::{LineDecoder, Lines, DEFAULT_ENCODINGS, DEFAULT_MAX_PENDING};
pub use self::token::ProtocolLine;
#[cfg(feature = "tokio")]
pub use self::transport::{TcpTransport, Transport, TransportError, DEFAULT_READ_SIZE};
