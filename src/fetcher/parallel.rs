use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{Result, TwetError};
use crate::domain::FeedSource;
use crate::fetcher::{FetchFailure, FetchReport, Fetcher};

pub const DEFAULT_WORKERS: usize = 10;

pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetch every source concurrently, one task per feed.
    ///
    /// Each fetch gets its own `timeout`. A failing feed is recorded in the
    /// report and never cancels the others. Results come back in the order
    /// of `sources`, whatever order the fetches finish in.
    pub async fn fetch_all(&self, sources: &[FeedSource], timeout: Duration) -> FetchReport {
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| {
                let fetcher = self.fetcher.clone();
                let semaphore = self.semaphore.clone();

                tokio::spawn(async move {
                    let result = match semaphore.acquire_owned().await {
                        Ok(_permit) => fetch_single_feed(&fetcher, &source, timeout).await,
                        Err(e) => Err(TwetError::Other(format!("Worker pool closed: {}", e))),
                    };
                    (source, result)
                })
            })
            .collect();

        let mut report = FetchReport::default();

        for (source, joined) in sources.iter().zip(join_all(handles).await) {
            match joined {
                Ok((source, Ok(body))) => report.contents.push((source, body)),
                Ok((source, Err(error))) => {
                    tracing::warn!("Failed to fetch {}: {}", source.url, error);
                    report.failures.push(FetchFailure { source, error });
                }
                Err(e) => {
                    tracing::error!("Task join error for {}: {}", source.url, e);
                    report.failures.push(FetchFailure {
                        source: source.clone(),
                        error: TwetError::Other(format!("Fetch task failed: {}", e)),
                    });
                }
            }
        }

        tracing::info!(
            "Fetched {} of {} feeds",
            report.fetched(),
            report.total()
        );

        report
    }
}

async fn fetch_single_feed(
    fetcher: &Arc<dyn Fetcher + Send + Sync>,
    source: &FeedSource,
    timeout: Duration,
) -> Result<Vec<u8>> {
    tracing::debug!("Fetching {} from {}", source.nickname, source.url);

    match tokio::time::timeout(timeout, fetcher.fetch(&source.url)).await {
        Ok(result) => result,
        Err(_) => Err(TwetError::Timeout {
            url: source.url.clone(),
            after: timeout,
        }),
    }
}
