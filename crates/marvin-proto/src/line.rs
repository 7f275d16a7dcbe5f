//! Line decoder for raw socket reads.
//!
//! IRC servers are not strict about text encoding, so each complete line is
//! decoded on its own through an ordered chain:
//!
//! 1. every preferred encoding, in order, rejecting on malformed input
//! 2. a statistical guess over the line's bytes
//! 3. the guessed encoding again, this time substituting bad sequences
//!
//! The last step cannot fail, so neither can decoding as a whole. Splitting
//! happens on raw `\n` bytes before decoding, which keeps a multi-byte
//! character cut by a read boundary intact in the retained partial line.
//!
//! The partial line is capped at [`DEFAULT_MAX_PENDING`] bytes (configurable
//! with [`LineDecoder::with_max_pending`]). A fragment that grows past the cap
//! is discarded and everything up to the next line feed is dropped with it.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use chardetng::EncodingDetector;
use encoding::Encoding;
use tracing::{debug, warn};

use crate::error::{ProtocolError, Result};
use crate::token::ProtocolLine;

/// Preferred encodings tried before falling back to detection.
pub const DEFAULT_ENCODINGS: &[&str] = &["UTF-8", "CP1252", "ISO-8859-1"];

/// Largest partial line kept between reads, in bytes.
pub const DEFAULT_MAX_PENDING: usize = 8191;

/// Buffers partial reads and yields whole [`ProtocolLine`]s.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    encodings: Arc<[&'static Encoding]>,
    /// Bytes after the last line feed seen so far.
    leftover: BytesMut,
    max_pending: usize,
    /// Set after an oversized fragment was thrown away; bytes are skipped
    /// until the line feed that ends it.
    discarding: bool,
}

impl LineDecoder {
    /// Create a decoder trying `labels` in order.
    ///
    /// Labels are WHATWG encoding labels, matched case-insensitively
    /// (`"UTF-8"`, `"cp1252"`, `"latin1"`, ...).
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let encodings = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Encoding::for_label(label.trim().as_bytes())
                    .ok_or_else(|| ProtocolError::UnknownEncoding(label.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            encodings: encodings.into(),
            leftover: BytesMut::new(),
            max_pending: DEFAULT_MAX_PENDING,
            discarding: false,
        })
    }

    /// Decoder with only UTF-8 preferred.
    pub fn utf8() -> Self {
        Self {
            encodings: Arc::from(vec![encoding::UTF_8]),
            leftover: BytesMut::new(),
            max_pending: DEFAULT_MAX_PENDING,
            discarding: false,
        }
    }

    /// Cap the buffered partial line at `max_pending` bytes.
    pub fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = max_pending;
        self
    }

    /// Append `bytes` and return the lines they complete.
    ///
    /// Any trailing fragment without a line feed stays buffered for the next
    /// call and is never yielded.
    pub fn feed(&mut self, bytes: &[u8]) -> Lines {
        let mut bytes = bytes;
        if self.discarding {
            match bytes.iter().position(|b| *b == b'\n') {
                Some(lf) => {
                    self.discarding = false;
                    bytes = &bytes[lf + 1..];
                }
                None => bytes = &[],
            }
        }

        // Only the new bytes can hold a line feed.
        let scanned = self.leftover.len();
        self.leftover.extend_from_slice(bytes);

        let chunk = match bytes.iter().rposition(|b| *b == b'\n') {
            Some(last_lf) => self.leftover.split_to(scanned + last_lf + 1).freeze(),
            None => Bytes::new(),
        };

        if self.leftover.len() > self.max_pending {
            warn!(
                pending = self.leftover.len(),
                max_pending = self.max_pending,
                "Discarding oversized partial line"
            );
            self.leftover.clear();
            self.discarding = true;
        }

        Lines {
            chunk,
            encodings: Arc::clone(&self.encodings),
        }
    }

    /// The buffered partial line.
    pub fn pending(&self) -> &[u8] {
        &self.leftover
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        // Every default label is a WHATWG label.
        Self::new(DEFAULT_ENCODINGS).unwrap_or_else(|_| Self::utf8())
    }
}

/// Lazily decoded lines produced by one [`LineDecoder::feed`] call.
#[derive(Debug)]
pub struct Lines {
    /// Complete lines only; always empty or ending in `\n`.
    chunk: Bytes,
    encodings: Arc<[&'static Encoding]>,
}

impl Iterator for Lines {
    type Item = ProtocolLine;

    fn next(&mut self) -> Option<ProtocolLine> {
        if self.chunk.is_empty() {
            return None;
        }
        let end = self
            .chunk
            .iter()
            .position(|b| *b == b'\n')
            .map_or(self.chunk.len(), |i| i + 1);
        let line = self.chunk.split_to(end);

        let mut body: &[u8] = &line;
        while let [rest @ .., b'\r' | b'\n'] = body {
            body = rest;
        }

        Some(ProtocolLine::new(decode_line(body, &self.encodings)))
    }
}

/// Decode one line through the fallback chain.
pub fn decode_line(raw: &[u8], preferred: &[&'static Encoding]) -> String {
    for encoding in preferred {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(raw) {
            return text.into_owned();
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let guess = detector.guess(None, true);

    if let Some(text) = guess.decode_without_bom_handling_and_without_replacement(raw) {
        debug!(encoding = guess.name(), "decoded line with detected encoding");
        return text.into_owned();
    }

    let (text, _had_errors) = guess.decode_without_bom_handling(raw);
    debug!(encoding = guess.name(), "decoded line lossily");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(lines: impl Iterator<Item = ProtocolLine>) -> Vec<String> {
        lines.map(|l| l.raw().to_string()).collect()
    }

    #[test]
    fn test_decode_complete_line() {
        let mut decoder = LineDecoder::default();
        let lines = raws(decoder.feed(b"PING :test\r\n"));
        assert_eq!(lines, vec!["PING :test"]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_decode_partial_line_is_retained() {
        let mut decoder = LineDecoder::default();
        assert!(raws(decoder.feed(b"PING :")).is_empty());
        assert_eq!(decoder.pending(), b"PING :");

        let lines = raws(decoder.feed(b"abc\r\nNEXT"));
        assert_eq!(lines, vec!["PING :abc"]);
        assert_eq!(decoder.pending(), b"NEXT");
    }

    #[test]
    fn test_multibyte_split_across_reads() {
        let text = "PRIVMSG #c :smörgås\r\n".as_bytes();
        // Cut in the middle of the two-byte 'ö'.
        let cut = text.iter().position(|b| *b == 0xC3).unwrap() + 1;

        let mut decoder = LineDecoder::default();
        assert!(raws(decoder.feed(&text[..cut])).is_empty());
        let lines = raws(decoder.feed(&text[cut..]));
        assert_eq!(lines, vec!["PRIVMSG #c :smörgås"]);
    }

    #[test]
    fn test_latin1_falls_back_to_cp1252() {
        let mut decoder = LineDecoder::default();
        let lines = raws(decoder.feed(b"PRIVMSG #c :sm\xF6rg\xE5s\n"));
        assert_eq!(lines, vec!["PRIVMSG #c :smörgås"]);
    }

    #[test]
    fn test_utf8_only_never_fails() {
        let mut decoder = LineDecoder::utf8();
        let lines: Vec<_> = decoder.feed(b"PRIVMSG #c :\xFF\xFE bad\n").collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].token(1), Some("PRIVMSG"));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = LineDecoder::new(&["UTF-8", "no-such-charset"]).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownEncoding(label) if label == "no-such-charset"));
    }

    #[test]
    fn test_empty_lines_are_yielded_as_empty() {
        let mut decoder = LineDecoder::default();
        let lines: Vec<_> = decoder.feed(b"\r\n\nPING x\n").collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].is_empty());
        assert!(lines[1].is_empty());
        assert_eq!(lines[2].token(1), Some("x"));
    }

    #[test]
    fn test_oversized_fragment_is_discarded() {
        let mut decoder = LineDecoder::default().with_max_pending(16);
        assert!(raws(decoder.feed(b"PRIVMSG #c :0123")).is_empty());
        assert_eq!(decoder.pending().len(), 16);

        // Crossing the cap drops the fragment and the rest of its line.
        assert!(raws(decoder.feed(b"4567")).is_empty());
        assert!(decoder.pending().is_empty());
        assert!(raws(decoder.feed(b"89abcdef")).is_empty());
        assert!(decoder.pending().is_empty());

        let lines = raws(decoder.feed(b"tail\r\nPING :ok\r\n"));
        assert_eq!(lines, vec!["PING :ok"]);
    }

    #[test]
    fn test_pending_stays_bounded_without_line_feeds() {
        let mut decoder = LineDecoder::default();
        let read = [b'x'; 2048];
        for _ in 0..100 {
            assert_eq!(decoder.feed(&read).count(), 0);
            assert!(decoder.pending().len() <= DEFAULT_MAX_PENDING);
        }
        let lines = raws(decoder.feed(b"\nPING :back\n"));
        assert_eq!(lines, vec!["PING :back"]);
    }

    #[test]
    fn test_lines_before_oversized_fragment_survive() {
        let mut decoder = LineDecoder::default().with_max_pending(8);
        let lines = raws(decoder.feed(b"PING :a\nthis fragment is too long"));
        assert_eq!(lines, vec!["PING :a"]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_lines_are_lazy() {
        let mut decoder = LineDecoder::default();
        let mut lines = decoder.feed(b"A\nB\nC\n");
        assert_eq!(lines.next().map(|l| l.raw().to_string()), Some("A".into()));
        assert_eq!(lines.count(), 2);
    }
}
