//! Positional access to the tokens of a decoded IRC line.
//!
//! The bot reads lines the way the IRC grammar lays them out:
//!
//! ```text
//! :alice!~a@host PRIVMSG #chan :hello marvin
//!  token 0        token 1 token 2  token 3..
//! ```
//!
//! Every accessor is bounds-checked and returns `None` instead of panicking,
//! so a short line simply means "this rule does not apply".

use std::fmt;

/// A decoded, newline-stripped IRC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolLine {
    raw: String,
    tokens: Vec<String>,
}

impl ProtocolLine {
    /// Build a line from decoded text. Trailing CR/LF is removed.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let trimmed = raw.trim_end_matches(&['\r', '\n'][..]).len();
        raw.truncate(trimmed);
        let tokens = raw.split_whitespace().map(str::to_owned).collect();
        Self { raw, tokens }
    }

    /// The line as received, without its terminator.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All whitespace-separated tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Token at `index`, if the line is long enough.
    #[inline]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// `true` when the line carries no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `true` when token 1 (the command after the prefix) equals `command`.
    pub fn is_command(&self, command: &str) -> bool {
        self.token(1) == Some(command)
    }

    /// Tokens from `start` onward joined with single spaces.
    ///
    /// Returns an empty string when the line is shorter than `start`.
    pub fn tail_from(&self, start: usize) -> String {
        self.tokens.get(start..).map(|t| t.join(" ")).unwrap_or_default()
    }

    /// The trailing message text: tokens 3.. joined, one leading ':' removed.
    pub fn trailing(&self) -> String {
        let tail = self.tail_from(3);
        match tail.strip_prefix(':') {
            Some(rest) => rest.to_owned(),
            None => tail,
        }
    }

    /// Nickname from the sender prefix in token 0.
    ///
    /// Takes the word characters following the first ':'. When that yields
    /// nothing, falls back to the prefix text up to the first '!'.
    pub fn sender_nick(&self) -> Option<&str> {
        let prefix = self.token(0)?;
        let after_colon = &prefix[prefix.find(':')? + 1..];
        let end = after_colon
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(after_colon.len());
        if end > 0 {
            return Some(&after_colon[..end]);
        }
        let fallback = after_colon.split('!').next().unwrap_or("");
        (!fallback.is_empty()).then_some(fallback)
    }
}

impl fmt::Display for ProtocolLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ProtocolLine {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
