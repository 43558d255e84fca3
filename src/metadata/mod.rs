//! Mention and reply markers embedded in tweet text.
//!
//! Recognized tokens:
//!
//! - `@<nick url>` and `@<nick url="url">`: mention with a feed URL
//! - `@nick`: bare mention, no URL
//! - `(#hash)`: reply marker; the first one in the text wins

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"@<(?P<nick>[^\s<>"]+)\s+(?:url="(?P<qurl>[^"]*)"|(?P<url>[^\s<>]+))\s*>"#,
        r#"|(?:^|[\s(\[,;])@(?P<bare>[A-Za-z0-9_]+(?:[.\-][A-Za-z0-9_]+)*)"#,
    ))
    .expect("mention pattern is valid")
});

static REPLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(?P<hash>[A-Za-z0-9]+)\)").expect("reply pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub nickname: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub mentions: Vec<Mention>,
    pub reply_to: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty() && self.reply_to.is_none()
    }
}

pub fn extract(text: &str) -> Metadata {
    Metadata {
        mentions: mentions(text),
        reply_to: reply_hash(text),
    }
}

/// Mentions in the order they appear.
pub fn mentions(text: &str) -> Vec<Mention> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(bare) = caps.name("bare") {
                return Some(Mention {
                    nickname: bare.as_str().to_string(),
                    url: None,
                });
            }
            let nickname = caps.name("nick")?.as_str().to_string();
            let url = caps
                .name("qurl")
                .or_else(|| caps.name("url"))
                .map(|m| m.as_str().to_string())
                .filter(|u| !u.is_empty());
            Some(Mention { nickname, url })
        })
        .collect()
}

pub fn reply_hash(text: &str) -> Option<String> {
    REPLY_RE
        .captures(text)
        .and_then(|caps| caps.name("hash"))
        .map(|m| m.as_str().to_string())
}
