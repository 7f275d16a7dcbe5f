//! File-based outbox.
//!
//! Any process can make the bot speak by dropping a text file into the
//! incoming directory. On each tick the session relays every line of every
//! file to the channel and then archives the file into the done directory,
//! so each file is relayed at most once.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::OutboxConfig;

/// The incoming/done directory pair.
#[derive(Debug, Clone)]
pub struct Outbox {
    incoming: PathBuf,
    done: PathBuf,
}

impl Outbox {
    pub fn new(incoming: impl Into<PathBuf>, done: impl Into<PathBuf>) -> Self {
        Self {
            incoming: incoming.into(),
            done: done.into(),
        }
    }

    pub fn from_config(config: &OutboxConfig) -> Self {
        Self::new(config.incoming.clone(), config.done.clone())
    }

    /// Regular files currently waiting in the incoming directory.
    ///
    /// Order is whatever the platform lists. A missing directory is treated
    /// as empty.
    pub fn pending(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.incoming) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(dir = %self.incoming.display(), error = %e, "Failed to list outbox");
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .collect()
    }

    /// Non-blank lines of `path`, invalid UTF-8 replaced.
    ///
    /// A file that cannot be read yields no lines; the failure is logged.
    pub fn read_lines(&self, path: &Path) -> Vec<String> {
        match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_owned)
                .collect(),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to read outbox file");
                Vec::new()
            }
        }
    }

    /// Move `path` into the done directory, or delete it if the move fails.
    pub fn archive(&self, path: &Path) {
        let moved = fs::create_dir_all(&self.done).and_then(|()| {
            let name = path
                .file_name()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no file name"))?;
            fs::rename(path, self.done.join(name))
        });

        match moved {
            Ok(()) => debug!(file = %path.display(), "Archived outbox file"),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to archive outbox file, removing it");
                if let Err(e) = fs::remove_file(path) {
                    warn!(file = %path.display(), error = %e, "Failed to remove outbox file");
                }
            }
        }
    }
}
