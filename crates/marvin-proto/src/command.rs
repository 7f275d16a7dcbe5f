//! Outbound IRC commands.
//!
//! The bot only ever sends a handful of commands. [`Command`] models them and
//! its `Display` impl produces the line without terminator; [`Command::to_wire`]
//! adds the CRLF the transport expects.

use std::fmt;

/// A command the bot sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NICK <nick>`
    Nick(String),
    /// `USER <nick> 0 * :<realname>`
    User {
        /// Username, the bot sends its nick here.
        nick: String,
        /// Free-form real name.
        realname: String,
    },
    /// `PRIVMSG <service> IDENTIFY <secret>`
    Identify {
        /// Target that accepts the IDENTIFY request.
        service: String,
        /// The password.
        secret: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PONG <token>`
    Pong(String),
    /// `PRIVMSG <target> :<text>`
    Privmsg(String, String),
    /// `QUIT [:<message>]`
    Quit(Option<String>),
}

impl Command {
    /// Serialize with the CRLF line terminator.
    pub fn to_wire(&self) -> String {
        format!("{self}\r\n")
    }

    /// The command verb, for logging.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Nick(_) => "NICK",
            Command::User { .. } => "USER",
            Command::Identify { .. } | Command::Privmsg(..) => "PRIVMSG",
            Command::Join(_) => "JOIN",
            Command::Pong(_) => "PONG",
            Command::Quit(_) => "QUIT",
        }
    }
}

/// Strip CR and LF so a parameter cannot smuggle a second command.
fn sanitize(s: &str) -> std::borrow::Cow<'_, str> {
    if s.contains(&['\r', '\n'][..]) {
        s.replace(&['\r', '\n'][..], " ").into()
    } else {
        s.into()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Nick(n) => write!(f, "NICK {}", sanitize(n)),
            Command::User { nick, realname } => {
                write!(f, "USER {} 0 * :{}", sanitize(nick), sanitize(realname))
            }
            Command::Identify { service, secret } => {
                write!(f, "PRIVMSG {} IDENTIFY {}", sanitize(service), sanitize(secret))
            }
            Command::Join(c) => write!(f, "JOIN {}", sanitize(c)),
            Command::Pong(t) => write!(f, "PONG {}", sanitize(t)),
            Command::Privmsg(t, m) => write!(f, "PRIVMSG {} :{}", sanitize(t), sanitize(m)),
            Command::Quit(Some(m)) => write!(f, "QUIT :{}", sanitize(m)),
            Command::Quit(None) => f.write_str("QUIT"),
        }
    }
}
