//! marvin - a small IRC bot.
//!
//! The bot keeps one connection to an IRC server, answers PING and INVITE,
//! logs the latest channel messages to a JSON file, relays text files
//! dropped into an outbox directory, and lets an ordered list of responders
//! reply to messages that mention it.
//!
//! Wire handling (transport, line decoding, commands) lives in the
//! `marvin-proto` crate; this crate holds the bot itself.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod outbox;
pub mod reactor;
pub mod responders;
pub mod session;

pub use config::Config;
pub use error::BotError;
pub use session::{Session, run_forever};
