//! Property-based tests for the timeline engine.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;

use twet::normalizer::{parse_line, parse_timestamp};
use twet::{merge, Direction, FeedSource, TimelineOptions, Tweet};

fn arb_source() -> impl Strategy<Value = Arc<FeedSource>> {
    prop::sample::select(vec![
        ("alice", "https://alice.example/twtxt.txt"),
        ("bob", "https://bob.example/twtxt.txt"),
        ("mirror", "https://alice.example/twtxt.txt"),
    ])
    .prop_map(|(nick, url)| Arc::new(FeedSource::new(nick, url)))
}

fn arb_timestamp() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (
        1_600_000_000i64..1_600_000_100,
        prop::sample::select(vec![0i32, 3600, -18000, 19800]),
    )
        .prop_map(|(secs, offset)| {
            let offset = FixedOffset::east_opt(offset).unwrap();
            Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset)
        })
}

fn arb_tweet() -> impl Strategy<Value = Tweet> {
    (
        arb_source(),
        arb_timestamp(),
        prop::sample::select(vec![
            "hello".to_string(),
            "hello\tworld".to_string(),
            "(#abc123def456) agreed".to_string(),
            "@<bob https://bob.example/twtxt.txt> hi".to_string(),
            "Привет 🎉".to_string(),
        ]),
    )
        .prop_map(|(source, ts, text)| Tweet::new(source, ts, text))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Fetch order never leaks into the merged order
    #[test]
    fn merge_is_order_independent(
        tweets in prop::collection::vec(arb_tweet(), 0..20),
        ascending in any::<bool>(),
        limit in 0usize..5,
    ) {
        let options = TimelineOptions {
            direction: if ascending { Direction::Ascending } else { Direction::Descending },
            limit,
            ..TimelineOptions::default()
        };
        let mut reversed = tweets.clone();
        reversed.reverse();

        prop_assert_eq!(merge(tweets, &options), merge(reversed, &options));
    }

    /// Merging an already merged timeline changes nothing
    #[test]
    fn merge_is_idempotent(tweets in prop::collection::vec(arb_tweet(), 0..20)) {
        let options = TimelineOptions::default();
        let once = merge(tweets, &options);
        let twice = merge(once.clone(), &options);
        prop_assert_eq!(once, twice);
    }

    /// No two tweets in a merged timeline share a hash
    #[test]
    fn merge_has_unique_hashes(tweets in prop::collection::vec(arb_tweet(), 0..20)) {
        let doubled: Vec<_> = tweets.iter().cloned().chain(tweets.iter().cloned()).collect();
        let merged = merge(doubled, &TimelineOptions::default());
        let mut hashes: Vec<_> = merged.iter().map(|t| t.hash()).collect();
        hashes.sort();
        let before = hashes.len();
        hashes.dedup();
        prop_assert_eq!(before, hashes.len());
    }

    /// Formatting a tweet as a feed line and parsing it back keeps the instant
    #[test]
    fn line_roundtrip_keeps_instant(tweet in arb_tweet()) {
        let line = tweet.to_line();
        let parsed = parse_line(&tweet.source, &line).unwrap().unwrap();
        prop_assert_eq!(parsed.timestamp, tweet.timestamp);
        prop_assert_eq!(parsed.offset, tweet.offset);
        prop_assert_eq!(parsed.hash(), tweet.hash());
    }

    /// Any RFC 3339 timestamp chrono can print, we can read
    #[test]
    fn rfc3339_timestamps_parse(ts in arb_timestamp()) {
        let parsed = parse_timestamp(&ts.to_rfc3339()).unwrap();
        prop_assert_eq!(parsed, ts);
    }
}
