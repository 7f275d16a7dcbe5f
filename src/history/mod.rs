//! Recent-message ring.
//!
//! Keeps the last N messages seen in (or sent to) the configured channel and
//! rewrites them as a JSON array on every loop tick. Nothing is appended on
//! disk; the file always mirrors the ring.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub mod types;

pub use types::ChannelMessage;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fixed-capacity FIFO of channel messages.
#[derive(Debug, Clone)]
pub struct RecentMessages {
    entries: VecDeque<ChannelMessage>,
    capacity: usize,
}

impl RecentMessages {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a message, evicting the oldest ones past capacity.
    pub fn append(&mut self, msg: ChannelMessage) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(msg);
    }

    /// Oldest-first copy of the ring.
    pub fn snapshot(&self) -> Vec<ChannelMessage> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Overwrite `path` with the ring as a 2-space indented JSON array.
    pub fn write_to(&self, path: &Path) -> Result<(), HistoryError> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, &self.entries)?;
        out.flush()?;
        Ok(())
    }
}
