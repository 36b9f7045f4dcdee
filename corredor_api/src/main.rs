mod app;
mod config;
mod debug;
mod error;
mod route;
mod snapshot;
mod state;

use crate::app::app;
use crate::config::AppConfig;
use crate::state::AppState;
use anyhow::Context;
use axum::serve;
use corredor_feeds::nominatim::{NominatimGeocoder, NominatimParams};
use corredor_feeds::open_data_feed::{OpenDataFeed, OpenDataFeedParams};
use corredor_routing::graph_store::{GraphStore, JsonGraphStore};
use corredor_routing::location_index::LocationIndex;
use corredor_routing::refresh::{RefreshParams, RefreshScheduler};
use corredor_routing::router::Router;
use corredor_routing::snapshot::{GraphSnapshot, SnapshotManager};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let graph = JsonGraphStore::new(&config.graph_path)
        .load()
        .with_context(|| format!("failed to load graph {}", config.graph_path.display()))?;
    let graph = Arc::new(graph);
    let index = Arc::new(LocationIndex::build_from_graph(&graph));
    let manager = Arc::new(SnapshotManager::new(GraphSnapshot::initial(graph, index)));

    let feed = OpenDataFeed::new(OpenDataFeedParams {
        highways_url: config.highways_url.clone(),
        congestions_url: config.congestions_url.clone(),
        request_timeout: config.feed_timeout,
    })?;

    let geocoder = NominatimGeocoder::new(NominatimParams {
        url: config.geocoder_url.clone(),
        context: config.geocoder_context.clone(),
        ..NominatimParams::default()
    })?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = RefreshScheduler::new(
        feed,
        Arc::clone(&manager),
        RefreshParams {
            interval: config.refresh_interval,
            feed_timeout: config.feed_timeout,
        },
    );
    let refresh_handle = scheduler.spawn(shutdown_rx);

    let state = Arc::new(AppState {
        router: Router::new(manager, geocoder),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    serve(listener, app(state))
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
            shutdown_tx.send(true).ok();
        })
        .await?;

    refresh_handle.await?;

    Ok(())
}
