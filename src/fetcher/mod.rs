pub mod file_fetcher;
pub mod http_fetcher;
pub mod parallel;

use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::app::{Result, TwetError};
use crate::domain::FeedSource;

pub use file_fetcher::FileFetcher;
pub use http_fetcher::HttpFetcher;
pub use parallel::ParallelFetcher;

#[async_trait]
pub trait Fetcher {
    /// Retrieve the raw content of the feed at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// A feed that could not be fetched, and why.
#[derive(Debug)]
pub struct FetchFailure {
    pub source: FeedSource,
    pub error: TwetError,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.nickname, self.error)
    }
}

/// Outcome of fetching a follow-list, in follow-list order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub contents: Vec<(FeedSource, Vec<u8>)>,
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    pub fn total(&self) -> usize {
        self.contents.len() + self.failures.len()
    }

    pub fn fetched(&self) -> usize {
        self.contents.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Local,
    Remote,
}

/// Decide whether a feed URL names a local file or a remote resource.
///
/// `file://` URLs and plain paths are local; `http`/`https` are remote.
pub fn locate(url: &str) -> Result<Location> {
    match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "file" => Ok(Location::Local),
            "http" | "https" => Ok(Location::Remote),
            other => Err(TwetError::UnsupportedScheme(other.to_string())),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Location::Local),
        Err(e) => Err(e.into()),
    }
}

/// Routes each URL to the filesystem or the network.
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            file: FileFetcher::new(),
        }
    }
}

#[async_trait]
impl Fetcher for SourceFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        match locate(url)? {
            Location::Local => self.file.fetch(url).await,
            Location::Remote => self.http.fetch(url).await,
        }
    }
}
