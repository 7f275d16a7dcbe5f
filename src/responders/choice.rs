//! Responders that pick one entry based on extra words in the message.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local, Weekday};
use rand::seq::IteratorRandom;

use super::strings::{Strings, render};
use crate::dispatch::{MessageContext, Responder, ResponderResult};

/// Place words and the strings key listing lunch spots there.
const LUNCH_PLACES: &[(&[&str], &str)] = &[
    (&["stan", "centrum", "karlskrona", "kna"], "lunch-karlskrona"),
    (&["ängelholm", "angelholm", "engelholm"], "lunch-angelholm"),
    (&["hässleholm", "hassleholm"], "lunch-hassleholm"),
    (&["malmö", "malmo", "malmoe"], "lunch-malmo"),
    (&["göteborg", "gbg"], "lunch-goteborg"),
];

const LUNCH_DEFAULT: &str = "lunch-bth";

/// Suggests somewhere to eat, near a named place when one is mentioned.
pub struct Lunch {
    strings: Arc<Strings>,
}

impl Lunch {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Lunch {
    fn name(&self) -> &str {
        "lunch"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["lunch", "mat", "äta", "luncha"]) {
            return Ok(None);
        }
        let Some(template) = self.strings.get("lunch-message") else {
            return Ok(None);
        };
        let key = LUNCH_PLACES
            .iter()
            .find(|(words, _)| msg.has_any(words))
            .map_or(LUNCH_DEFAULT, |(_, key)| *key);
        Ok(self.strings.get(key).map(|place| render(&template, &[place.as_str()])))
    }
}

/// Quotes one of the numbered commandments.
pub struct Budord {
    strings: Arc<Strings>,
}

impl Budord {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Budord {
    fn name(&self) -> &str {
        "budord"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["budord", "stentavla"]) {
            return Ok(None);
        }
        for n in 1..=5 {
            let plain = n.to_string();
            let hashed = format!("#{n}");
            if msg.has_any(&[plain.as_str(), hashed.as_str()]) {
                return Ok(self.strings.get_in("budord", &hashed));
            }
        }
        Ok(None)
    }
}

/// A named software principle, or a random one.
pub struct Principle {
    strings: Arc<Strings>,
}

impl Principle {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }
}

#[async_trait]
impl Responder for Principle {
    fn name(&self) -> &str {
        "principle"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["principle", "princip", "principer"]) {
            return Ok(None);
        }
        let Some(table) = self.strings.value("principle").and_then(|v| v.as_object()) else {
            return Ok(None);
        };
        let named = msg.ordered.iter().find_map(|word| table.get(word));
        let chosen = named.or_else(|| table.values().choose(&mut rand::thread_rng()));
        Ok(chosen.and_then(|v| v.as_str()).map(str::to_owned))
    }
}

/// Greeting for the weekday plus the video that goes with it.
pub struct Video {
    strings: Arc<Strings>,
}

impl Video {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }

    pub fn message_for(&self, day: Weekday) -> Option<String> {
        let n = day.number_from_monday().to_string();
        let greeting = self.strings.get_in("weekdays", &n)?;
        let video = self
            .strings
            .get_in("video-of-today", &n)
            .filter(|video| !video.is_empty());
        let tail = match video {
            Some(video) => self
                .strings
                .get_in("video-of-today", "suggestion")
                .map(|template| render(&template, &[video.as_str()])),
            None => self.strings.get_in("video-of-today", "missing"),
        };
        Some(match tail {
            Some(tail) => format!("{greeting} {tail}"),
            None => greeting,
        })
    }
}

#[async_trait]
impl Responder for Video {
    fn name(&self) -> &str {
        "video"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !(msg.has_any(&["idag", "dagens"]) && msg.has_any(&["video", "youtube", "tube"])) {
            return Ok(None);
        }
        Ok(self.message_for(Local::now().weekday()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn config() -> Config {
        "[irc]\nserver = \"irc.example.net\"\nchannel = \"#c\"\n"
            .parse()
            .unwrap()
    }

    fn strings() -> Arc<Strings> {
        Arc::new(
            r##"{
                "lunch-message": "Why not {}?",
                "lunch-bth": "the campus cafe",
                "lunch-malmo": ["the harbour"],
                "budord": {"#1": "Thou shalt commit.", "#3": "Thou shalt test."},
                "principle": {"dry": "Don't repeat yourself.", "kiss": "Keep it simple."},
                "weekdays": {"1": "Monday again.", "5": "Friday!", "7": "Sunday."},
                "video-of-today": {
                    "1": "",
                    "5": "https://youtu.be/friday",
                    "suggestion": "Watch {}",
                    "missing": "No video yet."
                }
            }"##
            .parse()
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_lunch_default_and_place() {
        let config = config();
        let lunch = Lunch::new(strings());

        let msg = MessageContext::new(":marvin lunch?", &config);
        assert_eq!(lunch.respond(&msg).await.unwrap().as_deref(), Some("Why not the campus cafe?"));

        let msg = MessageContext::new(":marvin mat i Malmö", &config);
        assert_eq!(lunch.respond(&msg).await.unwrap().as_deref(), Some("Why not the harbour?"));

        // Known place without strings entry: nothing to say.
        let msg = MessageContext::new(":marvin lunch gbg", &config);
        assert_eq!(lunch.respond(&msg).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_budord_by_number() {
        let config = config();
        let budord = Budord::new(strings());

        let msg = MessageContext::new(":marvin budord #1", &config);
        assert_eq!(budord.respond(&msg).await.unwrap().as_deref(), Some("Thou shalt commit."));

        let msg = MessageContext::new(":marvin stentavla 3", &config);
        assert_eq!(budord.respond(&msg).await.unwrap().as_deref(), Some("Thou shalt test."));

        let msg = MessageContext::new(":marvin budord", &config);
        assert_eq!(budord.respond(&msg).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_principle_named_or_random() {
        let config = config();
        let principle = Principle::new(strings());

        let msg = MessageContext::new(":marvin princip kiss", &config);
        assert_eq!(principle.respond(&msg).await.unwrap().as_deref(), Some("Keep it simple."));

        let msg = MessageContext::new(":marvin principle", &config);
        let reply = principle.respond(&msg).await.unwrap().unwrap();
        assert!(reply == "Don't repeat yourself." || reply == "Keep it simple.");
    }

    #[test]
    fn test_video_for_weekday() {
        let video = Video::new(strings());
        assert_eq!(
            video.message_for(Weekday::Fri).as_deref(),
            Some("Friday! Watch https://youtu.be/friday")
        );
        assert_eq!(
            video.message_for(Weekday::Mon).as_deref(),
            Some("Monday again. No video yet.")
        );
        assert_eq!(video.message_for(Weekday::Sun).as_deref(), Some("Sunday. No video yet."));
        assert_eq!(video.message_for(Weekday::Tue), None);
    }

    #[tokio::test]
    async fn test_video_needs_both_words() {
        let config = config();
        let video = Video::new(strings());

        let msg = MessageContext::new(":marvin video", &config);
        assert_eq!(video.respond(&msg).await.unwrap(), None);

        let msg = MessageContext::new(":marvin dagens youtube?", &config);
        let today = Local::now().weekday();
        assert_eq!(video.respond(&msg).await.unwrap(), video.message_for(today));
    }
}
