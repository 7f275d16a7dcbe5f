//! Built-in responders.
//!
//! Each responder is selected by name in the `[responders]` configuration
//! section and placed in the targeted or general list in the order given.
//! Most of them reply with text from the strings table; a few compute a URL
//! or a date, and `listen`, `nameday`, `joke` and `commit` ask web services.

mod bbq;
mod canned;
mod choice;
mod http;
mod links;
mod listen;
mod services;
pub mod strings;

pub use bbq::{Bbq, next_bbq, third_friday};
pub use canned::{Canned, Hello, Trigger};
pub use choice::{Budord, Lunch, Principle, Video};
pub use links::{Explain, Google, Strip};
pub use listen::{Listen, Track};
pub use services::{Commit, Joke, NameDay};
pub use strings::{Strings, StringsError};

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::dispatch::{Responder, ResponderRegistry};

/// Every built-in responder, in the default targeted order.
pub const BUILTIN_NAMES: &[&str] = &[
    "explain",
    "google",
    "lunch",
    "video",
    "whois",
    "help",
    "source",
    "budord",
    "quote",
    "stats",
    "irclog",
    "listen",
    "smile",
    "strip",
    "bbq",
    "nameday",
    "uptime",
    "stream",
    "principle",
    "joke",
    "commit",
    "hello",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

/// Construct the built-in responder called `name`.
pub fn build(name: &str, strings: &Arc<Strings>, config: &Config) -> Option<Box<dyn Responder>> {
    let s = Arc::clone(strings);
    let responder: Box<dyn Responder> = match name {
        "explain" => Box::new(Explain::new(s)),
        "google" => Box::new(Google::new(s)),
        "lunch" => Box::new(Lunch::new(s)),
        "video" => Box::new(Video::new(s)),
        "whois" => Box::new(Canned::new("whois", Trigger::All(&["vem", "är"]), "whois", s)),
        "help" => Box::new(Canned::new(
            "help",
            Trigger::Any(&["hjälp", "help", "menu", "meny"]),
            "menu",
            s,
        )),
        "source" => Box::new(Canned::new(
            "source",
            Trigger::Any(&["källkod", "source"]),
            "source",
            s,
        )),
        "budord" => Box::new(Budord::new(s)),
        "quote" => Box::new(Canned::new(
            "quote",
            Trigger::Any(&["quote", "citat", "filosofi", "filosofera"]),
            "hitchhiker",
            s,
        )),
        "stats" => Box::new(Canned::new(
            "stats",
            Trigger::Any(&["stats", "statistik", "ircstats"]),
            "ircstats",
            s,
        )),
        "irclog" => Box::new(Canned::new(
            "irclog",
            Trigger::Any(&["irc", "irclog", "log", "irclogg", "logg", "historik"]),
            "irclog",
            s,
        )),
        "listen" => Box::new(Listen::new(s, config.lastfm.clone())),
        "smile" => Box::new(Canned::new(
            "smile",
            Trigger::Any(&["smile", "le", "skratta", "smilies"]),
            "smile",
            s,
        )),
        "strip" => Box::new(Strip::new(s)),
        "bbq" => Box::new(Bbq::new(s)),
        "nameday" => Box::new(NameDay::new(s)),
        "uptime" => Box::new(
            Canned::new("uptime", Trigger::Any(&["uptime"]), "uptime", s).with_sub("info"),
        ),
        "stream" => Box::new(
            Canned::new(
                "stream",
                Trigger::Any(&["stream", "streama", "ström", "strömma"]),
                "stream",
                s,
            )
            .with_sub("info"),
        ),
        "principle" => Box::new(Principle::new(s)),
        "joke" => Box::new(Joke::new(s)),
        "commit" => Box::new(Commit::new(s)),
        "hello" => Box::new(Hello::new(s)),
        _ => return None,
    };
    Some(responder)
}

/// Load the strings table and fill both responder lists from configuration.
///
/// A strings file that cannot be loaded leaves the table empty, which
/// silences the canned responders without stopping the bot.
pub fn build_registry(config: &Config) -> ResponderRegistry {
    let strings = match Strings::load(&config.responders.strings) {
        Ok(strings) => {
            info!(path = %config.responders.strings.display(), "Loaded strings");
            strings
        }
        Err(e) => {
            warn!(
                path = %config.responders.strings.display(),
                error = %e,
                "Failed to load strings, canned replies disabled"
            );
            Strings::default()
        }
    };
    let strings = Arc::new(strings);

    let build_list = |names: &[String]| -> Vec<Box<dyn Responder>> {
        names
            .iter()
            .filter_map(|name| build(name, &strings, config))
            .collect()
    };

    let mut registry = ResponderRegistry::new();
    registry.register_targeted(build_list(&config.responders.targeted));
    registry.register_general(build_list(&config.responders.general));
    registry
}
