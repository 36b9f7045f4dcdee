use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use corredor_feeds::open_data_feed::{OpenDataFeed, OpenDataFeedParams};
use corredor_routing::refresh::{RefreshParams, RefreshScheduler};
use corredor_routing::snapshot::SnapshotManager;
use tracing::info;

use crate::graph::load_manager;
use crate::parsers;

#[derive(Args)]
pub struct FeedArgs {
    /// Highway geometry CSV url
    #[arg(long)]
    highways_url: Option<String>,

    /// Congestion readings url
    #[arg(long)]
    congestions_url: Option<String>,

    /// Timeout for fetching both feeds (e.g., "30s", "1m")
    #[arg(long, default_value = "30s", value_parser = parsers::parse_duration)]
    feed_timeout: Duration,
}

#[derive(Args)]
pub struct RefreshArgs {
    /// JSON street graph
    #[arg(short, long)]
    graph: PathBuf,

    #[command(flatten)]
    feed: FeedArgs,
}

/// Runs one refresh cycle against the live feeds and returns the published version.
pub async fn refresh_once(manager: &Arc<SnapshotManager>, args: FeedArgs) -> anyhow::Result<u64> {
    let defaults = OpenDataFeedParams::default();
    let feed = OpenDataFeed::new(OpenDataFeedParams {
        highways_url: args.highways_url.unwrap_or(defaults.highways_url),
        congestions_url: args.congestions_url.unwrap_or(defaults.congestions_url),
        request_timeout: args.feed_timeout,
    })?;

    let scheduler = RefreshScheduler::new(
        feed,
        Arc::clone(manager),
        RefreshParams {
            feed_timeout: args.feed_timeout,
            ..RefreshParams::default()
        },
    );

    Ok(scheduler.refresh_once().await?)
}

pub async fn run(args: RefreshArgs) -> anyhow::Result<()> {
    let manager = load_manager(&args.graph)?;
    let version = refresh_once(&manager, args.feed).await?;

    let status = manager.current().status();
    info!(version, segments = status.segments, "Refresh completed");

    println!("snapshot {} built at {}", status.version, status.built_at);
    println!("segments  {}", status.segments);
    for (level, count) in status.edges_per_level.iter().enumerate() {
        println!("level {level}   {count}");
    }

    Ok(())
}
