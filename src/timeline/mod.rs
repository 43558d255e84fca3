//! Merging many feeds into one ordered, deduplicated timeline.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{FeedSource, Tweet};
use crate::fetcher::{FetchFailure, ParallelFetcher};
use crate::normalizer::Normalizer;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Oldest first; the order threads are read in.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineOptions {
    pub direction: Direction,
    /// Keep only the most recent `limit` tweets; 0 keeps everything.
    pub limit: usize,
    /// Per-feed fetch deadline.
    pub timeout: Duration,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Descending,
            limit: 0,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TimelineOptions {
    pub fn ascending() -> Self {
        Self {
            direction: Direction::Ascending,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Total order on tweets: instant, then nickname, then text.
///
/// URL and offset break the remaining ties so that equal keys mean equal
/// tweets, which keeps the merge independent of input order.
pub fn chronological(a: &Tweet, b: &Tweet) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.source.nickname.cmp(&b.source.nickname))
        .then_with(|| a.text.cmp(&b.text))
        .then_with(|| a.source.url.cmp(&b.source.url))
        .then_with(|| {
            a.offset
                .local_minus_utc()
                .cmp(&b.offset.local_minus_utc())
        })
}

/// Deduplicate by hash, sort, and apply the limit.
///
/// Among tweets sharing a hash the one earliest in chronological order is
/// kept, so the result does not depend on the order `tweets` arrived in.
/// Descending output is the ascending result reversed, ties included.
pub fn merge(tweets: Vec<Tweet>, options: &TimelineOptions) -> Vec<Tweet> {
    let mut keyed: Vec<_> = tweets.into_iter().map(|t| (t.hash(), t)).collect();
    keyed.sort_by(|(_, a), (_, b)| chronological(a, b));

    let before = keyed.len();
    let mut seen = HashSet::with_capacity(keyed.len());
    let mut merged: Vec<Tweet> = keyed
        .into_iter()
        .filter(|(hash, _)| seen.insert(hash.clone()))
        .map(|(_, tweet)| tweet)
        .collect();

    if merged.len() < before {
        tracing::debug!("Collapsed {} duplicate tweets", before - merged.len());
    }

    if options.limit > 0 && merged.len() > options.limit {
        let excess = merged.len() - options.limit;
        merged.drain(..excess);
    }

    if options.direction == Direction::Descending {
        merged.reverse();
    }

    merged
}

/// Fetch every source, parse what arrived, and merge it.
///
/// Fetch failures are returned alongside the timeline built from the
/// feeds that did succeed.
pub async fn fetch_and_merge(
    fetcher: &ParallelFetcher,
    sources: &[FeedSource],
    options: &TimelineOptions,
) -> (Vec<Tweet>, Vec<FetchFailure>) {
    let report = fetcher.fetch_all(sources, options.timeout).await;
    let normalizer = Normalizer::new();

    let tweets: Vec<Tweet> = report
        .contents
        .into_iter()
        .flat_map(|(source, body)| normalizer.normalize(&Arc::new(source), &body))
        .collect();

    (merge(tweets, options), report.failures)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn tweet(nick: &str, ts: &str, text: &str) -> Tweet {
        let source = Arc::new(FeedSource::new(nick, format!("https://{}.example/twtxt.txt", nick)));
        Tweet::new(source, DateTime::parse_from_rfc3339(ts).unwrap(), text)
    }

    fn texts(tweets: &[Tweet]) -> Vec<&str> {
        tweets.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_descending_by_default() {
        let merged = merge(
            vec![
                tweet("a", "2024-01-01T00:00:00Z", "old"),
                tweet("b", "2024-01-03T00:00:00Z", "new"),
                tweet("a", "2024-01-02T00:00:00Z", "mid"),
            ],
            &TimelineOptions::default(),
        );
        assert_eq!(texts(&merged), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_ascending() {
        let merged = merge(
            vec![
                tweet("b", "2024-01-03T00:00:00Z", "new"),
                tweet("a", "2024-01-01T00:00:00Z", "old"),
            ],
            &TimelineOptions::ascending(),
        );
        assert_eq!(texts(&merged), vec!["old", "new"]);
    }

    #[test]
    fn test_sort_uses_instant_not_wall_clock() {
        // 10:00+02:00 is 08:00Z, earlier than 09:00Z.
        let merged = merge(
            vec![
                tweet("a", "2024-01-01T09:00:00Z", "nine utc"),
                tweet("b", "2024-01-01T10:00:00+02:00", "eight utc"),
            ],
            &TimelineOptions::ascending(),
        );
        assert_eq!(texts(&merged), vec!["eight utc", "nine utc"]);
    }

    #[test]
    fn test_ties_broken_by_nickname_then_text() {
        let ts = "2024-01-01T00:00:00Z";
        let merged = merge(
            vec![tweet("b", ts, "x"), tweet("a", ts, "z"), tweet("a", ts, "y")],
            &TimelineOptions::ascending(),
        );
        let keys: Vec<_> = merged
            .iter()
            .map(|t| (t.source.nickname.as_str(), t.text.as_str()))
            .collect();
        assert_eq!(keys, vec![("a", "y"), ("a", "z"), ("b", "x")]);
    }

    #[test]
    fn test_descending_ties_reverse_ascending_order() {
        let ts = "2024-01-01T00:00:00Z";
        let input = vec![tweet("a", ts, "y"), tweet("b", ts, "x")];
        let descending = merge(input.clone(), &TimelineOptions::default());
        let mut ascending = merge(input, &TimelineOptions::ascending());
        assert_eq!(texts(&descending), vec!["x", "y"]);
        ascending.reverse();
        assert_eq!(texts(&descending), texts(&ascending));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let t = tweet("a", "2024-01-01T00:00:00Z", "same");
        let merged = merge(vec![t.clone(), t.clone(), t], &TimelineOptions::default());
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_mirror_under_two_nicknames_keeps_one() {
        let url = "https://a.example/twtxt.txt";
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        let one = Tweet::new(Arc::new(FeedSource::new("zed", url)), ts, "hi");
        let two = Tweet::new(Arc::new(FeedSource::new("amy", url)), ts, "hi");

        let forward = merge(vec![one.clone(), two.clone()], &TimelineOptions::default());
        let backward = merge(vec![two, one], &TimelineOptions::default());

        assert_eq!(forward.len(), 1);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].source.nickname, "amy");
    }

    #[test]
    fn test_limit_keeps_most_recent() {
        let tweets = vec![
            tweet("a", "2024-01-01T00:00:00Z", "1"),
            tweet("a", "2024-01-02T00:00:00Z", "2"),
            tweet("a", "2024-01-03T00:00:00Z", "3"),
        ];

        let desc = merge(tweets.clone(), &TimelineOptions::default().with_limit(2));
        assert_eq!(texts(&desc), vec!["3", "2"]);

        let asc = merge(tweets.clone(), &TimelineOptions::ascending().with_limit(2));
        assert_eq!(texts(&asc), vec!["2", "3"]);

        let all = merge(tweets, &TimelineOptions::default().with_limit(0));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            direction: Direction,
        }
        let w: Wrapper = toml::from_str("direction = \"ascending\"").unwrap();
        assert_eq!(w.direction, Direction::Ascending);
    }
}
