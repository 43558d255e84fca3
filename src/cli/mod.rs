pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "twet")]
#[command(version, about = "A client for twtxt", long_about = None)]
pub struct Cli {
    /// Output debug info
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config directory (default: ~/.config/twet)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List followed feeds
    Following,
    /// Follow a feed
    Follow {
        /// Nickname to show the feed's tweets under
        nick: String,
        /// URL or local path of the feed
        url: String,
    },
    /// Stop following a feed
    Unfollow {
        nick: String,
    },
    /// Show the merged timeline of all followed feeds
    Timeline {
        /// Oldest first
        #[arg(long)]
        ascending: bool,

        /// Show only the most recent N tweets (0 = all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Per-feed fetch timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Show the conversation around a tweet
    Thread {
        /// Hash of any tweet in the thread
        hash: String,
    },
    /// Print the hash of a feed line as published at a URL
    Hash {
        /// URL the feed is published at
        url: String,
        /// A feed line: timestamp, tab, text
        line: String,
    },
}
