use std::sync::Arc;
use std::time::Duration;

use crate::app::{AppContext, Result, TwetError};
use crate::domain::{FeedSource, Tweet};
use crate::fetcher::FetchFailure;
use crate::normalizer::parse_line;
use crate::thread::{resolve_thread, ThreadIndex};
use crate::timeline::{fetch_and_merge, Direction, TimelineOptions};

pub fn following(ctx: &AppContext) -> Result<()> {
    let sources = ctx.sources();

    if sources.is_empty() {
        println!("Not following anyone");
        return Ok(());
    }

    for source in sources {
        println!("@{} {}", source.nickname, source.url);
    }

    Ok(())
}

pub fn follow(ctx: &mut AppContext, nick: &str, url: &str) -> Result<()> {
    let mut list = ctx.config.follow_list();
    let source = list.follow(nick, url)?;
    ctx.config.set_follow_list(list);
    ctx.save_config()?;

    println!("Following {}", source);
    Ok(())
}

pub fn unfollow(ctx: &mut AppContext, nick: &str) -> Result<()> {
    let mut list = ctx.config.follow_list();
    let source = list.unfollow(nick)?;
    ctx.config.set_follow_list(list);
    ctx.save_config()?;

    println!("Unfollowed {}", source);
    Ok(())
}

pub async fn timeline(
    ctx: &AppContext,
    ascending: bool,
    limit: Option<usize>,
    timeout: Option<u64>,
) -> Result<()> {
    let mut options = ctx.timeline_options();
    if ascending {
        options.direction = Direction::Ascending;
    }
    if let Some(limit) = limit {
        options.limit = limit;
    }
    if let Some(secs) = timeout {
        options.timeout = Duration::from_secs(secs);
    }

    let sources = ctx.sources();
    if sources.is_empty() {
        println!("Not following anyone");
        return Ok(());
    }

    let (tweets, failures) = fetch_and_merge(&ctx.parallel_fetcher, &sources, &options).await;
    report_failures(sources.len(), &failures);

    for tweet in &tweets {
        print!("{}", format_tweet(tweet));
    }

    Ok(())
}

pub async fn thread(ctx: &AppContext, hash: &str) -> Result<()> {
    let hash = hash.trim_start_matches('#');
    let sources = ctx.sources();
    let options = TimelineOptions {
        direction: Direction::Ascending,
        limit: 0,
        timeout: ctx.config.timeline.timeout(),
    };

    let (tweets, failures) = fetch_and_merge(&ctx.parallel_fetcher, &sources, &options).await;
    report_failures(sources.len(), &failures);

    let thread = resolve_thread(&tweets, hash)?;
    if let Some(parent) = &thread.missing_parent {
        println!("(thread continues from #{}, not in any followed feed)\n", parent);
    }

    let index = ThreadIndex::new(&thread.tweets);
    for tweet in &thread.tweets {
        let depth = depth_of(&index, tweet, thread.len());
        for line in format_tweet(tweet).lines() {
            println!("{}{}", "  ".repeat(depth), line);
        }
    }

    Ok(())
}

pub fn hash(url: &str, line: &str) -> Result<()> {
    let source = Arc::new(FeedSource::new("", url));
    let tweet = parse_line(&source, line)?
        .ok_or_else(|| TwetError::MalformedLine(line.to_string()))?;
    println!("{}", tweet.hash());
    Ok(())
}

fn report_failures(total: usize, failures: &[FetchFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{} of {} feeds fetched", total - failures.len(), total);
    for failure in failures {
        eprintln!("  ! {}", failure);
    }
}

/// Number of known ancestors of `tweet` within the thread.
fn depth_of(index: &ThreadIndex<'_>, tweet: &Tweet, max: usize) -> usize {
    let mut depth = 0;
    let mut cursor = tweet.hash().to_string();
    while let Some(parent) = index.parent_of(&cursor) {
        if depth >= max || index.get(parent).is_none() {
            break;
        }
        depth += 1;
        cursor = parent.to_string();
    }
    depth
}

pub fn format_tweet(tweet: &Tweet) -> String {
    format!(
        "@{} {} #{}\n{}\n\n",
        tweet.source.nickname,
        tweet.local_timestamp().format("%Y-%m-%d %H:%M"),
        tweet.hash(),
        tweet.text
    )
}
