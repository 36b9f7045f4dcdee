use serde::Serialize;

use crate::distance::{Distance, Meters};
use crate::geopoint::GeoPoint;

#[derive(Debug, Clone, Serialize)]
pub struct RoutingPath {
    nodes: Vec<usize>,
    points: Vec<GeoPoint>,
    distance: Distance<Meters>,
    itime: f64,
    snapshot_version: u64,
}

impl RoutingPath {
    pub fn new(
        nodes: Vec<usize>,
        points: Vec<GeoPoint>,
        distance: Distance<Meters>,
        itime: f64,
        snapshot_version: u64,
    ) -> RoutingPath {
        RoutingPath {
            nodes,
            points,
            distance,
            itime,
            snapshot_version,
        }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    /// Modeled travel time in hours.
    pub fn itime(&self) -> f64 {
        self.itime
    }

    pub fn snapshot_version(&self) -> u64 {
        self.snapshot_version
    }
}
