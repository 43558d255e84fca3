use std::fmt;

use serde::{Deserialize, Serialize};

/// A followed twtxt feed: the nickname it is known by and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeedSource {
    pub nickname: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(nickname: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.nickname, self.url)
    }
}
