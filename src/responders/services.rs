//! Responders backed by small public web services.
//!
//! Each one reads its URL from the strings table and falls back to the
//! table's `error` text when the service misbehaves.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value;
use tracing::warn;

use super::http;
use super::strings::{Strings, render, render_named};
use crate::dispatch::{MessageContext, Responder, ResponderError, ResponderResult};

/// Today's Swedish name day.
pub struct NameDay {
    strings: Arc<Strings>,
    http: reqwest::Client,
}

impl NameDay {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self {
            strings,
            http: http::client(),
        }
    }

    /// Names celebrated according to a `dagar` API response.
    pub fn names(body: &Value) -> Option<Vec<String>> {
        body.get("dagar")?
            .get(0)?
            .get("namnsdag")?
            .as_array()?
            .iter()
            .map(|name| name.as_str().map(str::to_owned))
            .collect()
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<String>, ResponderError> {
        let template = self
            .strings
            .get_in("nameday", "url")
            .ok_or_else(|| ResponderError::Other("no nameday url".into()))?;
        let (year, month, day) = (
            date.year().to_string(),
            date.month().to_string(),
            date.day().to_string(),
        );
        let url = render_named(
            &template,
            &[
                ("year", year.as_str()),
                ("month", month.as_str()),
                ("day", day.as_str()),
            ],
        );

        let body: Value = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Self::names(&body).ok_or_else(|| ResponderError::Other("no name day in response".into()))
    }
}

#[async_trait]
impl Responder for NameDay {
    fn name(&self) -> &str {
        "nameday"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["nameday", "namnsdag"]) {
            return Ok(None);
        }
        let reply = match self.fetch(Local::now().date_naive()).await {
            Ok(names) if names.is_empty() => self.strings.get_in("nameday", "nobody"),
            Ok(names) => self
                .strings
                .get_in("nameday", "somebody")
                .map(|template| render(&template, &[names.join(",").as_str()])),
            Err(e) => {
                warn!(error = %e, "Name day lookup failed");
                self.strings.get_in("nameday", "error")
            }
        };
        Ok(reply)
    }
}

/// A random Chuck Norris joke.
pub struct Joke {
    strings: Arc<Strings>,
    http: reqwest::Client,
}

impl Joke {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self {
            strings,
            http: http::client(),
        }
    }

    async fn fetch(&self) -> Result<String, ResponderError> {
        let url = self
            .strings
            .get_in("joke", "url")
            .ok_or_else(|| ResponderError::Other("no joke url".into()))?;
        let body: Value = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body.get("value")
            .and_then(|value| value.get("joke"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ResponderError::Other("no joke in response".into()))
    }
}

#[async_trait]
impl Responder for Joke {
    fn name(&self) -> &str {
        "joke"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["joke", "skämt", "chuck", "norris"]) {
            return Ok(None);
        }
        match self.fetch().await {
            Ok(joke) => Ok(Some(joke)),
            Err(e) => {
                warn!(error = %e, "Joke lookup failed");
                Ok(self.strings.get_in("joke", "error"))
            }
        }
    }
}

/// A random commit message from a plain-text service.
pub struct Commit {
    strings: Arc<Strings>,
    http: reqwest::Client,
}

impl Commit {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self {
            strings,
            http: http::client(),
        }
    }

    async fn fetch(&self) -> Result<String, ResponderError> {
        let url = self
            .strings
            .get_in("commit", "url")
            .ok_or_else(|| ResponderError::Other("no commit url".into()))?;
        let text = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text.trim().to_owned())
    }
}

#[async_trait]
impl Responder for Commit {
    fn name(&self) -> &str {
        "commit"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["commit", "-m"]) {
            return Ok(None);
        }
        let Some(template) = self.strings.get_in("commit", "message") else {
            return Ok(None);
        };
        let text = match self.fetch().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Commit message lookup failed");
                self.strings.get_in("commit", "error")
            }
        };
        Ok(text.map(|text| render(&template, &[text.as_str()])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::responders::http::stub;
    use serde_json::json;

    fn config() -> Config {
        "[irc]\nserver = \"irc.example.net\"\nchannel = \"#c\"\n"
            .parse()
            .unwrap()
    }

    fn strings(base: &str) -> Arc<Strings> {
        let table = json!({
            "nameday": {
                "url": format!("{base}/dagar/{{year}}/{{month}}/{{day}}"),
                "somebody": "Today: {}",
                "nobody": "Nobody today.",
                "error": "No calendar."
            },
            "joke": {
                "url": format!("{base}/jokes/random"),
                "error": "No jokes."
            },
            "commit": {
                "url": format!("{base}/index.txt"),
                "message": "Use this message: '{}'",
                "error": "fix"
            }
        });
        Arc::new(table.to_string().parse().unwrap())
    }

    #[test]
    fn test_parse_names() {
        let body = json!({"dagar": [{"namnsdag": ["Lukas", "Lucas"]}]});
        assert_eq!(NameDay::names(&body), Some(vec!["Lukas".into(), "Lucas".into()]));
        assert_eq!(NameDay::names(&json!({"dagar": []})), None);
    }

    #[tokio::test]
    async fn test_nameday_lists_names() {
        let base = stub::serve(vec![
            stub::json(200, json!({"dagar": [{"namnsdag": ["Lukas", "Lucas"]}]}).to_string()),
            stub::json(200, json!({"dagar": [{"namnsdag": []}]}).to_string()),
            stub::json(500, "{}"),
        ])
        .await;
        let config = config();
        let nameday = NameDay::new(strings(&base));
        let msg = MessageContext::new(":marvin vem har namnsdag?", &config);

        assert_eq!(nameday.respond(&msg).await.unwrap().as_deref(), Some("Today: Lukas,Lucas"));
        assert_eq!(nameday.respond(&msg).await.unwrap().as_deref(), Some("Nobody today."));
        assert_eq!(nameday.respond(&msg).await.unwrap().as_deref(), Some("No calendar."));
    }

    #[tokio::test]
    async fn test_joke_reads_value() {
        let base = stub::serve(vec![
            stub::json(200, json!({"value": {"joke": "Chuck Norris can divide by zero."}}).to_string()),
            stub::json(200, "not json"),
        ])
        .await;
        let config = config();
        let joke = Joke::new(strings(&base));
        let msg = MessageContext::new(":marvin berätta ett skämt", &config);

        assert_eq!(
            joke.respond(&msg).await.unwrap().as_deref(),
            Some("Chuck Norris can divide by zero.")
        );
        assert_eq!(joke.respond(&msg).await.unwrap().as_deref(), Some("No jokes."));
    }

    #[tokio::test]
    async fn test_commit_wraps_text() {
        let base = stub::serve(vec![stub::text(200, "  Fixed the thing.\n")]).await;
        let config = config();
        let commit = Commit::new(strings(&base));
        let msg = MessageContext::new(":marvin commit", &config);

        assert_eq!(
            commit.respond(&msg).await.unwrap().as_deref(),
            Some("Use this message: 'Fixed the thing.'")
        );
    }

    #[tokio::test]
    async fn test_commit_unreachable_uses_fallback() {
        let config = config();
        let commit = Commit::new(strings("http://127.0.0.1:1"));
        let msg = MessageContext::new(":marvin git commit -m", &config);
        assert_eq!(
            commit.respond(&msg).await.unwrap().as_deref(),
            Some("Use this message: 'fix'")
        );
    }

    #[tokio::test]
    async fn test_services_ignore_other_messages() {
        let config = config();
        let strings = strings("http://127.0.0.1:1");
        let msg = MessageContext::new(":marvin hej", &config);
        assert_eq!(NameDay::new(Arc::clone(&strings)).respond(&msg).await.unwrap(), None);
        assert_eq!(Joke::new(Arc::clone(&strings)).respond(&msg).await.unwrap(), None);
        assert_eq!(Commit::new(strings).respond(&msg).await.unwrap(), None);
    }
}
