//! Reply threads reconstructed from `(#hash)` markers.

use std::collections::{HashMap, HashSet};

use crate::app::{Result, TwetError};
use crate::domain::Tweet;
use crate::hash::Hash;
use crate::timeline::chronological;

/// A conversation around one tweet, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Ancestors, the target, then replies level by level.
    pub tweets: Vec<Tweet>,
    /// Set when the topmost tweet we have replies to something not fetched.
    pub missing_parent: Option<String>,
}

impl Thread {
    pub fn is_partial(&self) -> bool {
        self.missing_parent.is_some()
    }

    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }
}

/// Lookup tables over a merged timeline.
pub struct ThreadIndex<'a> {
    by_hash: HashMap<Hash, &'a Tweet>,
    parents: HashMap<Hash, String>,
    children: HashMap<String, Vec<Hash>>,
}

impl<'a> ThreadIndex<'a> {
    pub fn new(tweets: &'a [Tweet]) -> Self {
        let mut by_hash = HashMap::with_capacity(tweets.len());
        let mut parents = HashMap::new();
        let mut children: HashMap<String, Vec<Hash>> = HashMap::new();

        for tweet in tweets {
            let hash = tweet.hash();
            if by_hash.contains_key(&hash) {
                continue;
            }
            if let Some(parent) = tweet.reply_to() {
                children.entry(parent.clone()).or_default().push(hash.clone());
                parents.insert(hash.clone(), parent);
            }
            by_hash.insert(hash, tweet);
        }

        Self {
            by_hash,
            parents,
            children,
        }
    }

    pub fn get(&self, hash: &str) -> Option<&'a Tweet> {
        self.by_hash.get(hash).copied()
    }

    pub fn parent_of(&self, hash: &str) -> Option<&str> {
        self.parents.get(hash).map(String::as_str)
    }

    /// Direct replies to `hash`, oldest first.
    pub fn replies_to(&self, hash: &str) -> Vec<&'a Tweet> {
        let mut replies: Vec<_> = self
            .children
            .get(hash)
            .into_iter()
            .flatten()
            .filter_map(|h| self.get(h.as_str()))
            .collect();
        replies.sort_by(|a, b| chronological(a, b));
        replies
    }

    pub fn resolve(&self, hash: &str) -> Result<Thread> {
        let target = self
            .get(hash)
            .ok_or_else(|| TwetError::NotFound(hash.to_string()))?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(hash);

        // Upward: follow parent links until one is missing.
        let mut ancestors = Vec::new();
        let mut missing_parent = None;
        let mut cursor = hash;
        while let Some(parent) = self.parent_of(cursor) {
            if !visited.insert(parent) {
                break;
            }
            match self.by_hash.get_key_value(parent) {
                Some((key, tweet)) => {
                    ancestors.push(*tweet);
                    cursor = key.as_str();
                }
                None => {
                    missing_parent = Some(parent.to_string());
                    break;
                }
            }
        }
        ancestors.reverse();

        let mut tweets: Vec<Tweet> = ancestors.into_iter().cloned().collect();
        tweets.push(target.clone());

        // Downward: breadth-first, each level in chronological order.
        let mut level = vec![hash.to_string()];
        while !level.is_empty() {
            let mut next: Vec<&'a Tweet> = Vec::new();
            for parent in &level {
                for reply in self.replies_to(parent) {
                    next.push(reply);
                }
            }
            next.sort_by(|a, b| chronological(a, b));

            level = Vec::new();
            for reply in next {
                let reply_hash = reply.hash();
                if let Some((key, _)) = self.by_hash.get_key_value(reply_hash.as_str()) {
                    if !visited.insert(key.as_str()) {
                        continue;
                    }
                }
                tweets.push(reply.clone());
                level.push(reply_hash.to_string());
            }
        }

        Ok(Thread {
            tweets,
            missing_parent,
        })
    }
}

pub fn resolve_thread(timeline: &[Tweet], hash: &str) -> Result<Thread> {
    ThreadIndex::new(timeline).resolve(hash)
}
