use tracing::debug;

use crate::dijkstra::Dijkstra;
use crate::distance::{Distance, Meters};
use crate::error::RoutingError;
use crate::geopoint::GeoPoint;
use crate::routing_path::RoutingPath;
use crate::snapshot::GraphSnapshot;
use crate::stopwatch::Stopwatch;
use crate::weighting::ITimeWeighting;

fn check_coordinates(point: &GeoPoint) -> Result<(), RoutingError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(RoutingError::InvalidCoordinates {
            lat: point.lat,
            lng: point.lng,
        })
    }
}

/// Fastest path by itime between the nodes nearest to `origin` and
/// `destination`, computed entirely on `snapshot`.
pub fn find_path(
    snapshot: &GraphSnapshot,
    origin: &GeoPoint,
    destination: &GeoPoint,
) -> Result<RoutingPath, RoutingError> {
    check_coordinates(origin)?;
    check_coordinates(destination)?;

    let graph = snapshot.graph();

    let snap_sw = Stopwatch::new("path/snap");
    let start = snapshot
        .index()
        .closest_node(origin)
        .ok_or(RoutingError::EmptyGraph)?;
    let end = snapshot
        .index()
        .closest_node(destination)
        .ok_or(RoutingError::EmptyGraph)?;
    snap_sw.report();

    let search_sw = Stopwatch::new("path/dijkstra");
    let weighting = ITimeWeighting::new(snapshot.costs());
    let path = Dijkstra::new()
        .calc_path(graph, &weighting, start, end)?
        .ok_or(RoutingError::Unreachable)?;
    search_sw.report();

    let distance: Distance<Meters> = path
        .edges
        .iter()
        .map(|&edge_id| graph.edge(edge_id).distance())
        .sum();

    let points = path
        .nodes
        .iter()
        .map(|&node| *graph.node_geometry(node))
        .collect();

    debug!(
        start,
        end,
        nodes = path.nodes.len(),
        itime = path.weight,
        version = snapshot.version(),
        "Found path"
    );

    Ok(RoutingPath::new(
        path.nodes,
        points,
        distance,
        path.weight,
        snapshot.version(),
    ))
}
