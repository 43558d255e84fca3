//! Configuration management for twet.
//!
//! Configuration is read from `~/.config/twet/config.toml`, or from
//! `<dir>/config.toml` when a config directory is given. A missing file
//! means defaults; `follow` and `unfollow` write it back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::FollowList;
use crate::fetcher::parallel::DEFAULT_WORKERS;
use crate::timeline::{Direction, TimelineOptions, DEFAULT_TIMEOUT};

pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The user's own nickname.
    pub nick: String,
    /// Where the user's own feed is published.
    pub twturl: String,
    /// Tell feed hosts who is following them, via the User-Agent.
    pub disclose_identity: bool,
    /// Followed feeds: nickname → URL.
    pub following: BTreeMap<String, String>,
    pub timeline: TimelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nick: String::new(),
            twturl: String::new(),
            disclose_identity: true,
            following: BTreeMap::new(),
            timeline: TimelineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub direction: Direction,
    /// 0 = unlimited
    pub limit: usize,
    pub timeout_secs: u64,
    pub workers: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Descending,
            limit: 0,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl TimelineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn options(&self) -> TimelineOptions {
        TimelineOptions {
            direction: self.direction,
            limit: self.limit,
            timeout: self.timeout(),
        }
    }
}

impl Config {
    /// Load configuration from `dir`, or the default location.
    ///
    /// Returns the config together with the path it belongs at.
    pub fn load(dir: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let path = match dir {
            Some(dir) => dir.join(CONFIG_FILE),
            None => Self::default_config_path()?,
        };
        let config = Self::load_from(&path)?;
        Ok((config, path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/twet/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("twet").join(CONFIG_FILE))
    }

    pub fn follow_list(&self) -> FollowList {
        FollowList::from_map(self.following.clone())
    }

    pub fn set_follow_list(&mut self, list: FollowList) {
        self.following = list.into_map();
    }

    /// User-Agent sent with every fetch.
    ///
    /// With identity disclosure on and an identity configured, this follows
    /// the twtxt convention so feed owners can discover their followers.
    pub fn user_agent(&self) -> String {
        let base = format!("twet/{}", env!("CARGO_PKG_VERSION"));
        if self.disclose_identity && !self.nick.is_empty() && !self.twturl.is_empty() {
            format!("{} (+{}; @{})", base, self.twturl, self.nick)
        } else {
            base
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
}
