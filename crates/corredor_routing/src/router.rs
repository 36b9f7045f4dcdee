use std::sync::Arc;

use tracing::info;

use crate::error::RoutingError;
use crate::geopoint::GeoPoint;
use crate::location::{Geocoder, Location};
use crate::path_finder::find_path;
use crate::routing_path::RoutingPath;
use crate::snapshot::SnapshotManager;

/// Query interface: resolves both endpoints and searches the current snapshot.
pub struct Router<G> {
    manager: Arc<SnapshotManager>,
    geocoder: G,
}

impl<G: Geocoder> Router<G> {
    pub fn new(manager: Arc<SnapshotManager>, geocoder: G) -> Self {
        Router { manager, geocoder }
    }

    pub fn manager(&self) -> &Arc<SnapshotManager> {
        &self.manager
    }

    pub async fn resolve(&self, location: &Location) -> Result<GeoPoint, RoutingError> {
        let point = match location {
            Location::Coordinates(point) => *point,
            Location::Place(text) => self
                .geocoder
                .resolve(text)
                .await?
                .ok_or_else(|| RoutingError::Resolution(text.clone()))?,
        };

        if !point.is_valid() {
            return Err(RoutingError::InvalidCoordinates {
                lat: point.lat,
                lng: point.lng,
            });
        }

        Ok(point)
    }

    pub async fn route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RoutingPath, RoutingError> {
        let start = self.resolve(origin).await?;
        let end = self.resolve(destination).await?;

        // One snapshot for the whole search, even if a refresh publishes meanwhile.
        let snapshot = self.manager.current();

        let path = tokio::task::spawn_blocking(move || find_path(&snapshot, &start, &end))
            .await
            .map_err(|err| RoutingError::Search(err.to_string()))??;

        info!(
            nodes = path.nodes().len(),
            itime = path.itime(),
            version = path.snapshot_version(),
            "Route computed"
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocodeError;
    use crate::location_index::LocationIndex;
    use crate::snapshot::GraphSnapshot;
    use crate::test_graph_utils::test_graph::{grid_graph, grid_point};

    struct FixedGeocoder;

    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, text: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            match text {
                "corner" => Ok(Some(grid_point(2, 2))),
                "offline" => Err(GeocodeError::Timeout),
                "north of the pole" => Ok(Some(GeoPoint::new(95.0, 2.15))),
                _ => Ok(None),
            }
        }
    }

    fn router() -> Router<FixedGeocoder> {
        let graph = Arc::new(grid_graph(3, 3));
        let index = Arc::new(LocationIndex::build_from_graph(&graph));
        let manager = Arc::new(SnapshotManager::new(GraphSnapshot::initial(graph, index)));
        Router::new(manager, FixedGeocoder)
    }

    #[tokio::test]
    async fn test_route_with_place() {
        let router = router();

        let path = router
            .route(
                &Location::Coordinates(grid_point(0, 0)),
                &Location::Place("corner".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(path.points().first(), Some(&grid_point(0, 0)));
        assert_eq!(path.points().last(), Some(&grid_point(2, 2)));
        assert_eq!(path.snapshot_version(), 0);
    }

    #[tokio::test]
    async fn test_unknown_place() {
        let router = router();

        let result = router
            .route(
                &Location::Coordinates(grid_point(0, 0)),
                &Location::Place("atlantis".to_string()),
            )
            .await;

        assert!(matches!(result, Err(RoutingError::Resolution(text)) if text == "atlantis"));
    }

    #[tokio::test]
    async fn test_geocoder_failure() {
        let router = router();

        let result = router
            .route(
                &Location::Place("offline".to_string()),
                &Location::Coordinates(grid_point(0, 0)),
            )
            .await;

        assert!(matches!(result, Err(RoutingError::Geocode(GeocodeError::Timeout))));
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates() {
        let router = router();

        let result = router
            .route(
                &Location::Coordinates(GeoPoint::new(95.0, 2.0)),
                &Location::Coordinates(grid_point(0, 0)),
            )
            .await;
        assert!(matches!(result, Err(RoutingError::InvalidCoordinates { .. })));

        let result = router
            .resolve(&Location::Place("north of the pole".to_string()))
            .await;
        assert!(matches!(result, Err(RoutingError::InvalidCoordinates { .. })));
    }
}
