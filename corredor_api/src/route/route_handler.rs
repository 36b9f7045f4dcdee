use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use corredor_routing::location::{Geocoder, Location};
use corredor_routing::routing_path::RoutingPath;
use geo_types::LineString;
use geojson::{Feature, GeoJson, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct RouteResponse {
    path: GeoJson,
}

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Deserialize)]
pub struct RouteRequestBody {
    origin: Location,
    destination: Location,
}

/// Free text holding plain coordinates does not need the geocoder.
fn normalize(location: Location) -> Location {
    match location {
        Location::Place(text) => Location::parse(&text),
        location => location,
    }
}

fn to_geojson(path: &RoutingPath) -> GeoJson {
    let line: LineString = path
        .points()
        .iter()
        .map(geo_types::Point::<f64>::from)
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("itime_hours".to_string(), path.itime().into());
    properties.insert("distance_meters".to_string(), path.distance().value().into());
    properties.insert(
        "snapshot_version".to_string(),
        path.snapshot_version().into(),
    );
    properties.insert("nodes".to_string(), path.nodes().into());

    GeoJson::Feature(Feature {
        bbox: None,
        properties: Some(properties),
        foreign_members: None,
        id: None,
        geometry: Some(Geometry::new(geojson::Value::from(&line))),
    })
}

pub async fn route_handler<G: Geocoder + 'static>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<RouteRequestBody>, JsonRejection>,
) -> Result<RouteResponse, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let origin = normalize(body.origin);
    let destination = normalize(body.destination);

    let path = state.router.route(&origin, &destination).await?;

    Ok(RouteResponse {
        path: to_geojson(&path),
    })
}
