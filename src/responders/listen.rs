//! "What is playing?" via the last.fm recent-tracks API.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use super::http;
use super::strings::{Strings, render_named};
use crate::config::LastFmConfig;
use crate::dispatch::{MessageContext, Responder, ResponderError, ResponderResult};

/// One scrobbled track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub link: String,
}

impl Track {
    /// The newest track of a `user.getrecenttracks` response.
    pub fn from_recent_tracks(body: &Value) -> Option<Self> {
        let track = body.get("recenttracks")?.get("track")?.get(0)?;
        Some(Self {
            artist: track.get("artist")?.get("#text")?.as_str()?.to_owned(),
            title: track.get("name")?.as_str()?.to_owned(),
            link: track.get("url")?.as_str()?.to_owned(),
        })
    }

    fn render(&self, template: &str) -> String {
        render_named(
            template,
            &[
                ("artist", self.artist.as_str()),
                ("title", self.title.as_str()),
                ("link", self.link.as_str()),
            ],
        )
    }
}

pub struct Listen {
    strings: Arc<Strings>,
    lastfm: Option<LastFmConfig>,
    http: reqwest::Client,
    /// Last track successfully fetched, used when last.fm is unreachable.
    last: Mutex<Option<Track>>,
}

impl Listen {
    pub fn new(strings: Arc<Strings>, lastfm: Option<LastFmConfig>) -> Self {
        Self {
            strings,
            lastfm,
            http: http::client(),
            last: Mutex::new(None),
        }
    }

    pub fn last_track(&self) -> Option<Track> {
        self.last.lock().clone()
    }

    async fn fetch(&self, lastfm: &LastFmConfig) -> Result<Track, ResponderError> {
        let body: Value = self
            .http
            .get(&lastfm.endpoint)
            .query(&[
                ("method", "user.getrecenttracks"),
                ("user", lastfm.user.as_str()),
                ("api_key", lastfm.apikey.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Track::from_recent_tracks(&body)
            .ok_or_else(|| ResponderError::Other("no recent track in response".into()))
    }
}

#[async_trait]
impl Responder for Listen {
    fn name(&self) -> &str {
        "listen"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["lyssna", "lyssnar", "musik"]) {
            return Ok(None);
        }
        let Some(lastfm) = &self.lastfm else {
            return Ok(self.strings.get_in("listen", "disabled"));
        };

        match self.fetch(lastfm).await {
            Ok(track) => {
                debug!(artist = %track.artist, title = %track.title, "Fetched recent track");
                let reply = self
                    .strings
                    .get_in("listen", "success")
                    .map(|template| track.render(&template));
                *self.last.lock() = Some(track);
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "last.fm lookup failed");
                let stale = self.last_track().and_then(|track| {
                    self.strings
                        .get_in("listen", "stale")
                        .map(|template| track.render(&template))
                });
                Ok(stale.or_else(|| self.strings.get_in("listen", "failed")))
            }
        }
    }
}
