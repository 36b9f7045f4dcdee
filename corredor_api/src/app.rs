use crate::debug::closest::debug_closest_handler;
use crate::route::route_handler::route_handler;
use crate::snapshot::snapshot_handler::snapshot_handler;
use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use corredor_routing::location::Geocoder;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn app<G: Geocoder + 'static>(state: Arc<AppState<G>>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/route", post(route_handler::<G>))
        .route("/snapshot", get(snapshot_handler::<G>))
        .route("/debug/closest", get(debug_closest_handler::<G>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use corredor_routing::error::GeocodeError;
    use corredor_routing::geopoint::GeoPoint;
    use corredor_routing::graph_store::JsonGraphStore;
    use corredor_routing::location_index::LocationIndex;
    use corredor_routing::router::Router as QueryRouter;
    use corredor_routing::snapshot::{GraphSnapshot, SnapshotManager};
    use tower::ServiceExt;

    const GRAPH: &str = r#"{
        "nodes": [
            {"id": 1, "lat": 41.380, "lng": 2.150},
            {"id": 2, "lat": 41.381, "lng": 2.150},
            {"id": 3, "lat": 41.390, "lng": 2.170}
        ],
        "edges": [
            {"from": 1, "to": 2, "length": 111.2, "maxspeed": "30"}
        ]
    }"#;

    struct StubGeocoder;

    impl Geocoder for StubGeocoder {
        async fn resolve(&self, text: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            Ok((text == "Plaça Catalunya").then(|| GeoPoint::new(41.381, 2.150)))
        }
    }

    fn test_app() -> Router {
        let graph = Arc::new(JsonGraphStore::parse(GRAPH).unwrap());
        let index = Arc::new(LocationIndex::build_from_graph(&graph));
        let manager = Arc::new(SnapshotManager::new(GraphSnapshot::initial(graph, index)));

        app(Arc::new(AppState {
            router: QueryRouter::new(manager, StubGeocoder),
        }))
    }

    async fn post_route(body: &str) -> (StatusCode, String) {
        let response = test_app()
            .oneshot(
                Request::post("/route")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_route() {
        let (status, body) = post_route(
            r#"{"origin": {"lat": 41.380, "lng": 2.150}, "destination": "Plaça Catalunya"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["path"]["geometry"]["type"], "LineString");
        assert_eq!(
            json["path"]["geometry"]["coordinates"],
            serde_json::json!([[2.150, 41.380], [2.150, 41.381]])
        );
        assert_eq!(json["path"]["properties"]["nodes"], serde_json::json!([0, 1]));
    }

    #[tokio::test]
    async fn test_route_with_coordinate_text() {
        let (status, _) =
            post_route(r#"{"origin": "41.380 2.150", "destination": "41.381, 2.150"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_destination_not_found() {
        let (status, body) = post_route(
            r#"{"origin": {"lat": 41.380, "lng": 2.150}, "destination": "Atlantis"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Destination not found"));
    }

    #[tokio::test]
    async fn test_no_path_available() {
        let (status, body) = post_route(
            r#"{"origin": {"lat": 41.380, "lng": 2.150}, "destination": {"lat": 41.390, "lng": 2.170}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "No path available");
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates() {
        let (status, body) = post_route(
            r#"{"origin": {"lat": 95.0, "lng": 2.0}, "destination": {"lat": 41.381, "lng": 2.150}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("out of range"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, _) = post_route(r#"{"origin": 12}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_snapshot_status() {
        let response = test_app()
            .oneshot(Request::get("/snapshot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["edges_per_level"][0], 1);
    }

    #[tokio::test]
    async fn test_debug_closest() {
        let response = test_app()
            .oneshot(
                Request::get("/debug/closest?lat=41.3899&lng=2.1699")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["node_id"], 3);
    }
}
