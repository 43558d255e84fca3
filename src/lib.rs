//! # twet
//!
//! A client for [twtxt](https://twtxt.readthedocs.io/), the decentralized
//! microblogging format where every user publishes a plain text feed and
//! readers fetch the feeds they follow directly.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Metadata / Hash → Timeline → Thread
//! ```
//!
//! - [`fetcher`]: concurrent retrieval of feeds over HTTP or from disk
//! - [`normalizer`]: line-by-line, best-effort parsing of feed content
//! - [`metadata`]: mention and reply markers inside tweet text
//! - [`hash`]: content-addressed tweet identity
//! - [`timeline`]: merging feeds into one ordered, deduplicated view
//! - [`thread`]: reply threads rebuilt from `(#hash)` markers
//!
//! ## Quick Start
//!
//! ```bash
//! # Follow a feed
//! twet follow bob https://bob.example/twtxt.txt
//!
//! # Read everyone you follow, newest first
//! twet timeline
//!
//! # Show the conversation around a tweet
//! twet thread 1a2b3c4d5e6f
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config and
/// fetchers.
pub mod app;

/// Command-line interface using clap.
///
/// - `following` - List followed feeds
/// - `follow <nick> <url>` / `unfollow <nick>`
/// - `timeline [--ascending] [-n N]` - Merged timeline
/// - `thread <hash>` - Conversation around a tweet
/// - `hash <url> <line>` - Hash of a feed line
pub mod cli;

/// Configuration loaded from `~/.config/twet/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): a followed feed
/// - [`Tweet`](domain::Tweet): one parsed feed line
/// - [`FollowList`](domain::FollowList): followed feeds, unique by nickname
pub mod domain;

/// Feed retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`SourceFetcher`](fetcher::SourceFetcher): routes to disk or network
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): one task per feed,
///   bounded by a semaphore
pub mod fetcher;

pub mod hash;

pub mod metadata;

/// Feed line parsing.
///
/// Turns `timestamp<TAB>text` lines into [`Tweet`](domain::Tweet)s,
/// skipping comments, blank lines and anything malformed.
pub mod normalizer;

pub mod thread;

pub mod timeline;

pub use app::{Result, TwetError};
pub use domain::{FeedSource, FollowList, Tweet};
pub use fetcher::FetchFailure;
pub use hash::{compute_hash, Hash};
pub use thread::{resolve_thread, Thread};
pub use timeline::{fetch_and_merge, merge, Direction, TimelineOptions};
