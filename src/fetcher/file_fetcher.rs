use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::app::{Result, TwetError};
use crate::fetcher::Fetcher;

/// Reads feeds from the local filesystem, by `file://` URL or plain path.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

impl FileFetcher {
    pub fn new() -> Self {
        Self
    }

    pub fn path_of(url: &str) -> Result<PathBuf> {
        if url.starts_with("file:") {
            let parsed = Url::parse(url)?;
            parsed
                .to_file_path()
                .map_err(|_| TwetError::Other(format!("Not a local file URL: {}", url)))
        } else {
            Ok(PathBuf::from(url))
        }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = Self::path_of(url)?;
        tracing::debug!("Reading feed from {}", path.display());
        Ok(tokio::fs::read(&path).await?)
    }
}
