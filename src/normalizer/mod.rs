use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::app::{Result, TwetError};
use crate::domain::{FeedSource, Tweet};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a twtxt timestamp.
///
/// Accepts RFC 3339 and the looser forms found in the wild: a space instead
/// of `T`, `+hhmm` offsets, minutes without seconds. A timestamp without an
/// offset is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    let mut s = trimmed.to_string();
    if s.len() > 10 && matches!(s.as_bytes()[10], b' ' | b't') {
        s.replace_range(10..11, "T");
    }
    if s.ends_with('Z') || s.ends_with('z') {
        s.pop();
        s.push_str("+00:00");
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(TwetError::InvalidTimestamp(trimmed.to_string()))
}

/// Parse one physical line of a feed.
///
/// Returns `Ok(None)` for blank lines and `#` comments. The first tab splits
/// timestamp from text; any later tabs belong to the text.
pub fn parse_line(source: &Arc<FeedSource>, line: &str) -> Result<Option<Tweet>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let (timestamp, text) = line
        .split_once('\t')
        .ok_or_else(|| TwetError::MalformedLine(line.to_string()))?;
    let timestamp = parse_timestamp(timestamp)?;

    Ok(Some(Tweet::new(source.clone(), timestamp, text)))
}

/// Turns raw feed bytes into tweets, line by line.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Best effort: a bad line is logged and skipped, never fatal to the feed.
    pub fn normalize(&self, source: &Arc<FeedSource>, body: &[u8]) -> Vec<Tweet> {
        let raw = String::from_utf8_lossy(body);
        let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let mut tweets = Vec::new();
        let mut skipped = 0usize;

        for (lineno, line) in content.lines().enumerate() {
            match parse_line(source, line) {
                Ok(Some(tweet)) => tweets.push(tweet),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("{}:{}: {}", source.nickname, lineno + 1, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::debug!(
                "Skipped {} lines from {}, kept {}",
                skipped,
                source.url,
                tweets.len()
            );
        }

        tweets
    }
}
