use std::path::PathBuf;

use clap::Args;
use corredor_feeds::nominatim::{NominatimGeocoder, NominatimParams};
use corredor_routing::location::Location;
use corredor_routing::router::Router;

use crate::graph::load_manager;
use crate::refresh::{FeedArgs, refresh_once};

#[derive(Args)]
pub struct RouteArgs {
    /// JSON street graph
    #[arg(short, long)]
    graph: PathBuf,

    /// Origin, either "lat lon" or a place name
    #[arg(short, long)]
    from: String,

    /// Destination, either "lat lon" or a place name
    #[arg(short, long)]
    to: String,

    /// City appended to place names before geocoding
    #[arg(long, default_value = "Barcelona")]
    context: String,

    /// Fetch live congestion before routing
    #[arg(long)]
    live: bool,

    #[command(flatten)]
    feed: FeedArgs,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let manager = load_manager(&args.graph)?;

    if args.live {
        refresh_once(&manager, args.feed).await?;
    }

    let geocoder = NominatimGeocoder::new(NominatimParams {
        context: (!args.context.is_empty()).then_some(args.context),
        ..NominatimParams::default()
    })?;

    let router = Router::new(manager, geocoder);
    let path = router
        .route(&Location::parse(&args.from), &Location::parse(&args.to))
        .await?;

    println!("{}", serde_json::to_string_pretty(&path)?);

    Ok(())
}
