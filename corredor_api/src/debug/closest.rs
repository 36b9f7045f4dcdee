use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use corredor_routing::geopoint::GeoPoint;
use corredor_routing::location::Geocoder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DebugClosestQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize)]
pub struct DebugClosestResponse {
    pub node: usize,
    pub node_id: i64,
    pub point: GeoPoint,
    pub snapshot_version: u64,
}

impl IntoResponse for DebugClosestResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn debug_closest_handler<G: Geocoder + 'static>(
    State(state): State<Arc<AppState<G>>>,
    query: Query<DebugClosestQuery>,
) -> Result<DebugClosestResponse, ApiError> {
    let point = GeoPoint::new(query.lat, query.lng);
    if !point.is_valid() {
        return Err(ApiError::BadRequest("Invalid coordinates".to_string()));
    }

    let snapshot = state.router.manager().current();

    let Some(node) = snapshot.index().closest_node(&point) else {
        return Err(ApiError::NotFound("Could not find node".to_string()));
    };

    let street_node = snapshot.graph().node(node);

    Ok(DebugClosestResponse {
        node,
        node_id: street_node.id,
        point: street_node.point,
        snapshot_version: snapshot.version(),
    })
}
