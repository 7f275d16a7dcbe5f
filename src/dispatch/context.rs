//! Message context handed to every responder.
//!
//! A PRIVMSG body is normalized once per dispatch:
//!
//! ```text
//! ":Marvin, google rust lifetimes?"
//!   -> lowercase, [,.?:] -> ' '
//!   -> ordered: ["marvin", "google", "rust", "lifetimes"]
//!   -> words:   {"marvin", "google", "rust", "lifetimes"}
//! ```
//!
//! Responders match against the set and use the ordered list (or the raw
//! body) for positional work such as "everything after the keyword".

use std::collections::HashSet;
use std::sync::LazyLock;

use marvin_proto::ProtocolLine;
use regex::Regex;

use crate::config::Config;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,.?:]").expect("static regex"));

/// Normalized view of one incoming message.
#[derive(Debug)]
pub struct MessageContext<'a> {
    /// Distinct normalized words.
    pub words: HashSet<String>,
    /// Normalized words in message order, duplicates kept.
    pub ordered: Vec<String>,
    /// The body as sent, leading ':' removed, case preserved.
    pub raw: String,
    /// Read-only bot configuration.
    pub config: &'a Config,
}

impl<'a> MessageContext<'a> {
    /// Build a context from a message body (tokens 3.. of a PRIVMSG line).
    pub fn new(body: &str, config: &'a Config) -> Self {
        let ordered: Vec<String> = PUNCTUATION
            .replace_all(&body.to_lowercase(), " ")
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        let words = ordered.iter().cloned().collect();
        let raw = body.strip_prefix(':').unwrap_or(body).to_owned();

        Self {
            words,
            ordered,
            raw,
            config,
        }
    }

    /// Context for a PRIVMSG line.
    pub fn from_line(line: &ProtocolLine, config: &'a Config) -> Self {
        Self::new(&line.tail_from(3), config)
    }

    /// `true` when the bot's nick appears as a word.
    pub fn mentions(&self, nick: &str) -> bool {
        self.words.contains(&nick.to_lowercase())
    }

    /// `true` when any of `keywords` is present.
    pub fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.words.contains(*k))
    }

    /// `true` when every one of `keywords` is present.
    pub fn has_all(&self, keywords: &[&str]) -> bool {
        keywords.iter().all(|k| self.words.contains(*k))
    }

    /// The first word of the message that is one of `keywords`.
    pub fn first_match(&self, keywords: &[&str]) -> Option<&str> {
        self.ordered
            .iter()
            .map(String::as_str)
            .find(|w| keywords.contains(w))
    }

    /// Normalized words after the first occurrence of `keyword`, space-joined.
    pub fn words_after(&self, keyword: &str) -> String {
        match self.ordered.iter().position(|w| w == keyword) {
            Some(i) => self.ordered[i + 1..].join(" "),
            None => String::new(),
        }
    }

    /// Raw text after the first case-insensitive occurrence of `keyword`.
    ///
    /// Keeps punctuation and case, which matters for shell commands and URLs.
    pub fn raw_after(&self, keyword: &str) -> String {
        let lower = self.raw.to_lowercase();
        // Lowercasing can change byte lengths outside ASCII; offsets into
        // `lower` are only valid for `raw` when the lengths agree.
        if lower.len() == self.raw.len()
            && let Some(start) = lower.find(keyword)
        {
            return self.raw[start + keyword.len()..].trim().to_owned();
        }
        self.words_after(keyword)
    }
}
