use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::FeedSource;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::{Fetcher, SourceFetcher};
use crate::timeline::TimelineOptions;

pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub parallel_fetcher: ParallelFetcher,
}

impl AppContext {
    pub fn new(dir: Option<&Path>) -> Result<Self> {
        let (config, config_path) = Config::load(dir)?;
        Self::with_config(config, config_path)
    }

    pub fn with_config(config: Config, config_path: PathBuf) -> Result<Self> {
        let http = HttpFetcher::new(&config.user_agent())?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(SourceFetcher::new(http));
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher, config.timeline.workers);

        Ok(Self {
            config,
            config_path,
            parallel_fetcher,
        })
    }

    pub fn sources(&self) -> Vec<FeedSource> {
        self.config.follow_list().sources()
    }

    pub fn timeline_options(&self) -> TimelineOptions {
        self.config.timeline.options()
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path)?;
        Ok(())
    }
}
