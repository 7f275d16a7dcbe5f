//! Responders that answer with a link.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Url;

use super::strings::{Strings, render, render_named};
use crate::dispatch::{MessageContext, Responder, ResponderError, ResponderResult};

const GOOGLE_URL: &str = "https://www.google.se/search";
const EXPLAIN_URL: &str = "http://explainshell.com/explain";

/// `base?name=<value>` with the value form-encoded.
fn link_with_query(base: &str, name: &str, value: &str) -> Result<Url, ResponderError> {
    Url::parse_with_params(base, &[(name, value)]).map_err(|e| ResponderError::Other(e.to_string()))
}

/// Like [`link_with_query`], with the `keep` characters left unescaped.
fn link_keeping(base: &str, name: &str, value: &str, keep: &[char]) -> Result<String, ResponderError> {
    let mut link = link_with_query(base, name, value)?.to_string();
    for c in keep {
        link = link.replace(&format!("%{:02X}", u32::from(*c)), &c.to_string());
    }
    Ok(link)
}

/// Search link for the words after `google`.
pub struct Google {
    strings: Arc<Strings>,
}

impl Google {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Google {
    fn name(&self) -> &str {
        "google"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        let Some(keyword) = msg.first_match(&["google", "googla"]) else {
            return Ok(None);
        };
        let Some(template) = self.strings.get("google") else {
            return Ok(None);
        };
        let url = link_with_query(GOOGLE_URL, "q", &msg.words_after(keyword))?;
        Ok(Some(render(&template, &[url.as_str()])))
    }
}

/// explainshell.com link for the shell command after `explain`.
///
/// Reads the raw message so flags and paths survive normalization.
pub struct Explain {
    strings: Arc<Strings>,
}

impl Explain {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Explain {
    fn name(&self) -> &str {
        "explain"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        let Some(keyword) = msg.first_match(&["explain", "förklara"]) else {
            return Ok(None);
        };
        let Some(template) = self.strings.get("explainShell") else {
            return Ok(None);
        };
        let url = link_keeping(EXPLAIN_URL, "cmd", &msg.raw_after(keyword), &['/', ':'])?;
        Ok(Some(render(&template, &[url.as_str()])))
    }
}

const RANDOM_WORDS: &[&str] = &["rand", "random", "slump", "lucky"];

/// Latest (or a random) CommitStrip comic.
pub struct Strip {
    strings: Arc<Strings>,
}

impl Strip {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }

    fn random_url(&self) -> Option<String> {
        let table = self.strings.value("commitstrip")?;
        let first = table.get("first")?.as_u64()?;
        let last = table.get("last")?.as_u64()?;
        if first > last {
            return None;
        }
        let page = rand::thread_rng().gen_range(first..=last);
        Some(format!("{}{page}", self.strings.get_in("commitstrip", "urlPage")?))
    }
}

#[async_trait]
impl Responder for Strip {
    fn name(&self) -> &str {
        "strip"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["strip", "comic", "nöje", "paus"]) {
            return Ok(None);
        }
        let Some(template) = self.strings.get_in("commitstrip", "message") else {
            return Ok(None);
        };
        let url = if msg.has_any(RANDOM_WORDS) {
            self.random_url()
        } else {
            self.strings.get_in("commitstrip", "url")
        };
        Ok(url.map(|url| render_named(&template, &[("url", url.as_str())])))
    }
}
