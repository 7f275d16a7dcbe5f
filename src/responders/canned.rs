//! Keyword-triggered replies straight from the strings table.

use std::sync::Arc;

use async_trait::async_trait;

use super::strings::Strings;
use crate::dispatch::{MessageContext, Responder, ResponderResult};

/// When a canned responder fires.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of the words is present.
    Any(&'static [&'static str]),
    /// All of the words are present.
    All(&'static [&'static str]),
}

impl Trigger {
    pub fn matches(&self, msg: &MessageContext<'_>) -> bool {
        match self {
            Trigger::Any(words) => msg.has_any(words),
            Trigger::All(words) => msg.has_all(words),
        }
    }
}

/// Replies with `key` (or `key.sub`) when triggered.
pub struct Canned {
    name: &'static str,
    trigger: Trigger,
    key: &'static str,
    sub: Option<&'static str>,
    strings: Arc<Strings>,
}

impl Canned {
    pub fn new(name: &'static str, trigger: Trigger, key: &'static str, strings: Arc<Strings>) -> Self {
        Self {
            name,
            trigger,
            key,
            sub: None,
            strings,
        }
    }

    /// Read `key.sub` instead of `key`.
    pub fn with_sub(mut self, sub: &'static str) -> Self {
        self.sub = Some(sub);
        self
    }
}

#[async_trait]
impl Responder for Canned {
    fn name(&self) -> &str {
        self.name
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !self.trigger.matches(msg) {
            return Ok(None);
        }
        Ok(match self.sub {
            Some(sub) => self.strings.get_in(self.key, sub),
            None => self.strings.get(self.key),
        })
    }
}

const GREETINGS: &[&str] = &[
    "snälla", "hej", "tjena", "morsning", "morrn", "mår", "hallå", "halloj", "läget", "snäll",
    "duktig", "träna", "träning", "utbildning", "tack", "tacka", "tackar", "tacksam",
];

/// Friendly greeting: a smiley, a hello and a compliment.
pub struct Hello {
    strings: Arc<Strings>,
}

impl Hello {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Hello {
    fn name(&self) -> &str {
        "hello"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(GREETINGS) {
            return Ok(None);
        }
        let parts = [
            self.strings.get("smile"),
            self.strings.get("hello"),
            self.strings.get("friendly"),
        ];
        Ok(parts
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(" ")))
    }
}
