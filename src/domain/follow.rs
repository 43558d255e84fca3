use std::collections::BTreeMap;

use crate::app::{Result, TwetError};
use crate::domain::FeedSource;

/// The feeds a user follows, keyed by nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowList {
    feeds: BTreeMap<String, String>,
}

impl FollowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(feeds: BTreeMap<String, String>) -> Self {
        Self { feeds }
    }

    pub fn follow(&mut self, nickname: &str, url: &str) -> Result<FeedSource> {
        if self.feeds.contains_key(nickname) {
            return Err(TwetError::DuplicateNickname(nickname.to_string()));
        }
        self.feeds.insert(nickname.to_string(), url.to_string());
        Ok(FeedSource::new(nickname, url))
    }

    pub fn unfollow(&mut self, nickname: &str) -> Result<FeedSource> {
        self.feeds
            .remove(nickname)
            .map(|url| FeedSource::new(nickname, url))
            .ok_or_else(|| TwetError::UnknownNickname(nickname.to_string()))
    }

    pub fn get(&self, nickname: &str) -> Option<FeedSource> {
        self.feeds
            .get(nickname)
            .map(|url| FeedSource::new(nickname, url.as_str()))
    }

    /// Followed feeds in nickname order.
    pub fn sources(&self) -> Vec<FeedSource> {
        self.feeds
            .iter()
            .map(|(nick, url)| FeedSource::new(nick.as_str(), url.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.feeds
    }
}
