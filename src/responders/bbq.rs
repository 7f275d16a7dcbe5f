//! Countdown to the next barbecue.
//!
//! Barbecues happen on the third Friday of May and of September.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate, Weekday};

use super::strings::{Strings, render};
use crate::dispatch::{MessageContext, Responder, ResponderResult};

const MAY: u32 = 5;
const SEPTEMBER: u32 = 9;

/// Third Friday of `month` in `year`.
pub fn third_friday(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, 3)
}

/// The first barbecue on or after `after`.
pub fn next_bbq(after: NaiveDate) -> Option<NaiveDate> {
    let year = after.year();
    [
        third_friday(year, MAY)?,
        third_friday(year, SEPTEMBER)?,
    ]
    .into_iter()
    .find(|date| after <= *date)
    .or_else(|| third_friday(year + 1, MAY))
}

pub struct Bbq {
    strings: Arc<Strings>,
}

impl Bbq {
    pub fn new(strings: Arc<Strings>) -> Self {
        Self { strings }
    }

    /// Reply text as seen on `today`.
    pub fn message_for(&self, today: NaiveDate) -> Option<String> {
        let next = next_bbq(today)?;
        let days = (next - today).num_days();
        let key = match days {
            0 => "today",
            1 => "tomorrow",
            2..14 => "week",
            14..200 => "base",
            _ => "eternity",
        };
        let date = next.format("%Y-%m-%d").to_string();
        let text = render(&self.strings.get_in("barbecue", key)?, &[date.as_str()]);
        Some(match self.strings.get_in("barbecue", "url") {
            Some(url) => format!("{url}. {text}"),
            None => text,
        })
    }
}

#[async_trait]
impl Responder for Bbq {
    fn name(&self) -> &str {
        "bbq"
    }

    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult {
        if !msg.has_any(&["grilla", "grill", "grillcon", "bbq"]) {
            return Ok(None);
        }
        Ok(self.message_for(Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_third_friday() {
        assert_eq!(third_friday(2024, MAY), Some(date(2024, 5, 17)));
        assert_eq!(third_friday(2024, SEPTEMBER), Some(date(2024, 9, 20)));
        // Month starting on a Friday.
        assert_eq!(third_friday(2023, SEPTEMBER), Some(date(2023, 9, 15)));
    }

    #[test]
    fn test_next_bbq() {
        assert_eq!(next_bbq(date(2024, 1, 10)), Some(date(2024, 5, 17)));
        assert_eq!(next_bbq(date(2024, 5, 17)), Some(date(2024, 5, 17)));
        assert_eq!(next_bbq(date(2024, 5, 18)), Some(date(2024, 9, 20)));
        assert_eq!(next_bbq(date(2024, 9, 21)), Some(date(2025, 5, 16)));
    }

    fn bbq() -> Bbq {
        Bbq::new(Arc::new(
            r#"{
                "barbecue": {
                    "url": "http://grill.example",
                    "today": "Today!",
                    "tomorrow": "Tomorrow!",
                    "week": "Soon, {}",
                    "base": "On {}",
                    "eternity": "Far away, {}"
                }
            }"#
            .parse()
            .unwrap(),
        ))
    }

    #[test]
    fn test_message_ranges() {
        let bbq = bbq();
        assert_eq!(bbq.message_for(date(2024, 5, 17)).unwrap(), "http://grill.example. Today!");
        assert_eq!(bbq.message_for(date(2024, 5, 16)).unwrap(), "http://grill.example. Tomorrow!");
        assert_eq!(
            bbq.message_for(date(2024, 5, 10)).unwrap(),
            "http://grill.example. Soon, 2024-05-17"
        );
        assert_eq!(
            bbq.message_for(date(2024, 1, 1)).unwrap(),
            "http://grill.example. On 2024-05-17"
        );
        // 2024-09-21 -> 2025-05-16 is 237 days.
        assert_eq!(
            bbq.message_for(date(2024, 9, 21)).unwrap(),
            "http://grill.example. Far away, 2025-05-16"
        );
    }

    #[test]
    fn test_missing_strings_stay_silent() {
        let bbq = Bbq::new(Arc::new(Strings::default()));
        assert_eq!(bbq.message_for(date(2024, 5, 17)), None);
    }
}
