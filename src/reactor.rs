//! Protocol-level reactions to incoming lines.
//!
//! Three independent rules run on every line:
//!
//! | Rule    | Condition                         | Reaction                 |
//! |---------|-----------------------------------|--------------------------|
//! | PING    | token 0 is `PING`                 | `PONG <token 1>`         |
//! | INVITE  | token 1 is `INVITE`               | `JOIN <token 3>`         |
//! | channel | token 1 is `PRIVMSG` to home chan | log a [`ChannelMessage`] |
//!
//! A line too short for a rule simply does not trigger it. The reactor only
//! decides; the session performs the sends and ring appends.

use marvin_proto::{Command, ProtocolLine};
use tracing::debug;

use crate::config::Config;
use crate::history::ChannelMessage;

/// Something the session must do in response to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Write a command to the server.
    Send(Command),
    /// Append a message to the recent-message ring.
    Record(ChannelMessage),
}

/// Apply the protocol rules to `line`, in rule order.
pub fn react(line: &ProtocolLine, config: &Config) -> Vec<Reaction> {
    let mut out = Vec::new();

    if line.token(0) == Some("PING")
        && let Some(token) = line.token(1)
    {
        out.push(Reaction::Send(Command::Pong(token.to_owned())));
    }

    if line.is_command("INVITE")
        && let Some(channel) = line.token(3)
    {
        // The channel is taken as sent; some servers prefix it with ':'.
        debug!(channel, "Invited");
        out.push(Reaction::Send(Command::Join(channel.to_owned())));
    }

    if line.is_command("PRIVMSG")
        && let Some(target) = line.token(2)
        && config.is_home_channel(target)
    {
        let user = line.sender_nick().unwrap_or_default();
        out.push(Reaction::Record(ChannelMessage::now(user, line.trailing())));
    }

    out
}
