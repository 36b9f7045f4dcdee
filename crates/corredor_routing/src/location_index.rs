use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::debug;

use crate::geopoint::GeoPoint;
use crate::graph::StreetGraph;

type LocationIndexObject = GeomWithData<[f64; 2], usize>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Nearest-node lookups over the projected node coordinates of a graph.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build_from_graph(graph: &StreetGraph) -> LocationIndex {
        debug!(nodes = graph.node_count(), "Building location index");

        let tree = RTree::bulk_load_with_params(
            graph
                .nodes()
                .iter()
                .enumerate()
                .map(|(node, street_node)| {
                    LocationIndexObject::new(street_node.point.project(), node)
                })
                .collect(),
        );

        LocationIndex { tree }
    }

    /// `None` for an empty index or coordinates that cannot be projected.
    pub fn closest_node(&self, coordinates: &GeoPoint) -> Option<usize> {
        if !coordinates.is_valid() {
            return None;
        }

        self.tree
            .nearest_neighbor(&coordinates.project())
            .map(|neighbor| neighbor.data)
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }
}
