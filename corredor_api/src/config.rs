use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use corredor_feeds::nominatim::NOMINATIM_SEARCH_URL;
use corredor_feeds::open_data_feed::{BARCELONA_CONGESTIONS_URL, BARCELONA_HIGHWAYS_URL};

const ENV_PREFIX: &str = "CORREDOR_";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graph_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub refresh_interval: Duration,
    pub feed_timeout: Duration,
    pub highways_url: String,
    pub congestions_url: String,
    pub geocoder_url: String,
    pub geocoder_context: Option<String>,
    pub log_level: tracing::Level,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        let graph_path = get("GRAPH_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("{ENV_PREFIX}GRAPH_PATH is required"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse()
            .context("invalid BIND_ADDR")?;

        let refresh_interval = parse_secs(get("REFRESH_INTERVAL_SECS"), 300)
            .context("invalid REFRESH_INTERVAL_SECS")?;
        let feed_timeout =
            parse_secs(get("FEED_TIMEOUT_SECS"), 30).context("invalid FEED_TIMEOUT_SECS")?;

        let log_level = get("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .parse()
            .map_err(|_| anyhow!("invalid LOG_LEVEL"))?;

        let geocoder_context = match get("GEOCODER_CONTEXT") {
            Some(context) if context.is_empty() => None,
            Some(context) => Some(context),
            None => Some("Barcelona".to_string()),
        };

        Ok(AppConfig {
            graph_path,
            bind_addr,
            refresh_interval,
            feed_timeout,
            highways_url: get("HIGHWAYS_URL").unwrap_or_else(|| BARCELONA_HIGHWAYS_URL.to_string()),
            congestions_url: get("CONGESTIONS_URL")
                .unwrap_or_else(|| BARCELONA_CONGESTIONS_URL.to_string()),
            geocoder_url: get("GEOCODER_URL").unwrap_or_else(|| NOMINATIM_SEARCH_URL.to_string()),
            geocoder_context,
            log_level,
        })
    }
}

fn parse_secs(value: Option<String>, default: u64) -> anyhow::Result<Duration> {
    let secs = match value {
        Some(value) => value.parse::<u64>()?,
        None => default,
    };

    if secs == 0 {
        return Err(anyhow!("duration must be positive"));
    }

    Ok(Duration::from_secs(secs))
}
