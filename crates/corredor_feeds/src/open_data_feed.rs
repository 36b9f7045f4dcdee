use std::time::Duration;

use corredor_routing::congestion::{HighwaySegment, TrafficSegment, join_segments};
use corredor_routing::error::FeedError;
use corredor_routing::refresh::CongestionFeed;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::congestions::parse_congestions;
use crate::error::FeedClientError;
use crate::highways::parse_highways;

pub const BARCELONA_HIGHWAYS_URL: &str = "https://opendata-ajuntament.barcelona.cat/data/dataset/1090983a-1c40-4609-8620-14ad49aae3ab/resource/1d6c814c-70ef-4147-aa16-a49ddb952f72/download/transit_relacio_trams.csv";
pub const BARCELONA_CONGESTIONS_URL: &str = "https://opendata-ajuntament.barcelona.cat/data/dataset/8319c2b1-4c21-4962-9acd-6db4c5ff1148/resource/2d456eb5-4ea6-4f68-9794-2f3f1a58a933/download";

pub struct OpenDataFeedParams {
    pub highways_url: String,
    pub congestions_url: String,
    pub request_timeout: Duration,
}

impl Default for OpenDataFeedParams {
    fn default() -> Self {
        OpenDataFeedParams {
            highways_url: BARCELONA_HIGHWAYS_URL.to_string(),
            congestions_url: BARCELONA_CONGESTIONS_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Barcelona open-data traffic feed. Highway geometry is static and fetched
/// once; congestion readings are fetched on every call.
pub struct OpenDataFeed {
    params: OpenDataFeedParams,
    client: reqwest::Client,
    highways: OnceCell<Vec<HighwaySegment>>,
}

impl OpenDataFeed {
    pub fn new(params: OpenDataFeedParams) -> Result<Self, FeedClientError> {
        let client = reqwest::Client::builder()
            .timeout(params.request_timeout)
            .build()?;

        Ok(Self {
            params,
            client,
            highways: OnceCell::new(),
        })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FeedClientError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedClientError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    pub async fn highways(&self) -> Result<&[HighwaySegment], FeedClientError> {
        let highways = self
            .highways
            .get_or_try_init(|| async {
                let content = self.fetch_text(&self.params.highways_url).await?;
                let highways = parse_highways(&content)?;
                info!(count = highways.len(), "Fetched highway geometry");
                Ok::<_, FeedClientError>(highways)
            })
            .await?;

        Ok(highways)
    }
}

impl CongestionFeed for OpenDataFeed {
    async fn fetch_segments(&self) -> Result<Vec<TrafficSegment>, FeedError> {
        let highways = self.highways().await?;

        let content = self.fetch_text(&self.params.congestions_url).await?;
        let readings = parse_congestions(&content)?;
        debug!(count = readings.len(), "Fetched congestion readings");

        Ok(join_segments(highways, &readings))
    }
}
