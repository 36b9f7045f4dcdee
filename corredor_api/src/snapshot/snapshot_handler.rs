use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use corredor_routing::location::Geocoder;
use corredor_routing::snapshot::SnapshotStatus;
use std::sync::Arc;

pub async fn snapshot_handler<G: Geocoder + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<SnapshotStatus> {
    Json(state.router.manager().current().status())
}
