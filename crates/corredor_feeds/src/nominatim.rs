use std::time::Duration;

use corredor_routing::error::GeocodeError;
use corredor_routing::geopoint::GeoPoint;
use corredor_routing::location::Geocoder;
use serde::Deserialize;
use tracing::debug;

use crate::error::FeedClientError;

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

pub struct NominatimParams {
    pub url: String,
    /// Appended to every query, e.g. the city the graph covers.
    pub context: Option<String>,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for NominatimParams {
    fn default() -> Self {
        NominatimParams {
            url: NOMINATIM_SEARCH_URL.to_string(),
            context: Some("Barcelona".to_string()),
            user_agent: concat!("corredor/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// A result with unusable coordinates counts as no match.
fn first_place(places: &[NominatimPlace]) -> Option<GeoPoint> {
    let place = places.first()?;
    let lat = place.lat.parse::<f64>().ok()?;
    let lng = place.lon.parse::<f64>().ok()?;
    Some(GeoPoint::new(lat, lng)).filter(GeoPoint::is_valid)
}

pub struct NominatimGeocoder {
    params: NominatimParams,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(params: NominatimParams) -> Result<Self, FeedClientError> {
        let client = reqwest::Client::builder()
            .user_agent(params.user_agent.clone())
            .timeout(params.request_timeout)
            .build()?;

        Ok(Self { params, client })
    }

    fn query(&self, text: &str) -> String {
        match &self.params.context {
            Some(context) => format!("{text}, {context}"),
            None => text.to_string(),
        }
    }

    async fn search(&self, text: &str) -> Result<Option<GeoPoint>, FeedClientError> {
        let query = self.query(text);

        let response = self
            .client
            .get(&self.params.url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedClientError::Api {
                status: status.as_u16(),
            });
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let point = first_place(&places);
        debug!(query, found = point.is_some(), "Geocoded location");

        Ok(point)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, text: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        Ok(self.search(text).await?)
    }
}
