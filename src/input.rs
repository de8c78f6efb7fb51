//! Target URL extraction from line-oriented input.
//!
//! Each input line may contain arbitrary text; the first `http://` or `https://`
//! token on the line is taken as the target and the rest is ignored.

use std::sync::LazyLock;

use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::URL_PATTERN;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"));

/// Returns the first http(s) URL on a line, if any.
///
/// The URL runs up to the next whitespace character, so trailing punctuation
/// stays attached (`"see https://a.example/x."` yields `https://a.example/x.`).
pub fn extract_url(line: &str) -> Option<&str> {
    URL_REGEX.find(line).map(|m| m.as_str())
}

/// Streams target URLs from a line-oriented reader.
///
/// Lines without a URL are skipped. URLs are produced one at a time so a caller
/// can trace each target before the next line is read. Lines are read as raw
/// bytes; invalid UTF-8 is replaced rather than ending the stream.
pub struct UrlLines<R> {
    reader: R,
    buf: Vec<u8>,
    skipped: usize,
}

impl<R: AsyncBufRead + Unpin> UrlLines<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            skipped: 0,
        }
    }

    /// Returns the next URL, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the reader fails.
    pub async fn next_url(&mut self) -> std::io::Result<Option<String>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end_matches(['\n', '\r']);
            match extract_url(line) {
                Some(url) => return Ok(Some(url.to_string())),
                None => {
                    self.skipped += 1;
                    log::debug!("Skipping line without URL: {}", line);
                }
            }
        }
    }

    /// Number of lines skipped so far because they contained no URL.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
