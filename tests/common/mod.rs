//! Integration test common infrastructure.
//!
//! Provides an in-process fake IRC server for the bot to connect to, and a
//! helper writing a bot configuration into a temporary directory.

pub mod server;

use std::path::Path;
use std::sync::Arc;

use marvin::Config;

#[allow(unused_imports)]
pub use server::{BotConnection, FakeIrcServer};

/// Configuration pointing at `port` with all files inside `dir`.
///
/// `extra` lands right after the `[irc]` keys, so it can also open a new
/// table such as `[session]`.
#[allow(dead_code)]
pub fn test_config(dir: &Path, port: u16, extra: &str) -> Arc<Config> {
    let strings = Path::new(env!("CARGO_MANIFEST_DIR")).join("marvin_strings.json");
    let content = format!(
        r##"
[irc]
server = "127.0.0.1"
port = {port}
channel = "#dbwebb"
nick = "marvin"
{extra}

[log]
path = "{log}"
capacity = 5

[outbox]
incoming = "{incoming}"
done = "{done}"

[responders]
strings = "{strings}"
targeted = ["help", "google", "budord"]
general = ["hello"]
"##,
        log = dir.join("irclog.txt").display(),
        incoming = dir.join("incoming").display(),
        done = dir.join("done").display(),
        strings = strings.display(),
    );
    Arc::new(content.parse().expect("test config parses"))
}
