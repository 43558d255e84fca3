use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::domain::FeedSource;
use crate::hash::{compute_hash, Hash};
use crate::metadata::{self, Metadata};

/// One line of a feed, parsed.
///
/// The instant is kept in UTC; `offset` remembers the offset the feed wrote
/// it in so the line can be redisplayed the way its author published it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub source: Arc<FeedSource>,
    pub timestamp: DateTime<Utc>,
    pub offset: FixedOffset,
    pub text: String,
}

impl Tweet {
    pub fn new(
        source: Arc<FeedSource>,
        timestamp: DateTime<FixedOffset>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source,
            timestamp: timestamp.with_timezone(&Utc),
            offset: *timestamp.offset(),
            text: text.into(),
        }
    }

    pub fn hash(&self) -> Hash {
        compute_hash(self)
    }

    pub fn metadata(&self) -> Metadata {
        metadata::extract(&self.text)
    }

    /// The parent this tweet replies to, if its text carries a `(#hash)` marker.
    pub fn reply_to(&self) -> Option<String> {
        self.metadata().reply_to
    }

    pub fn local_timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp.with_timezone(&self.offset)
    }

    /// Render back into feed form: `timestamp<TAB>text`.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}",
            self.local_timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.text
        )
    }
}
