//! Type definitions for the recent-message log.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One channel message as written to the log file.
///
/// Field names are the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Local wall-clock time, `HH:MM` right-aligned to five columns.
    pub time: String,
    /// Sender nickname.
    pub user: String,
    /// Message text.
    #[serde(rename = "msg")]
    pub message: String,
}

impl ChannelMessage {
    /// A message stamped with the current local time.
    pub fn now(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(Local::now(), user, message)
    }

    pub fn at(when: DateTime<Local>, user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            time: format!("{:>5}", when.format("%H:%M")),
            user: user.into(),
            message: message.into(),
        }
    }

    /// A message sent by the bot itself; the nick is left-aligned to eight
    /// columns so the log lines up.
    pub fn own(nick: &str, message: impl Into<String>) -> Self {
        Self::now(format!("{nick:<8}"), message)
    }
}
