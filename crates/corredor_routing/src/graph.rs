use fxhash::FxHashMap;

use crate::distance::{Distance, Meters};
use crate::error::GraphStoreError;
use crate::geopoint::GeoPoint;
use crate::speed::DeclaredSpeed;

#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Identifier assigned by the graph provider (an OSM node id).
    pub id: i64,
    pub point: GeoPoint,
}

#[derive(Debug, Clone)]
pub struct StreetEdge {
    start_node: usize,
    end_node: usize,
    distance: Distance<Meters>,
    speed: DeclaredSpeed,
}

impl StreetEdge {
    pub fn new(
        start_node: usize,
        end_node: usize,
        distance: Distance<Meters>,
        speed: DeclaredSpeed,
    ) -> Self {
        StreetEdge {
            start_node,
            end_node,
            distance,
            speed,
        }
    }

    pub fn start_node(&self) -> usize {
        self.start_node
    }

    pub fn end_node(&self) -> usize {
        self.end_node
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    pub fn speed(&self) -> &DeclaredSpeed {
        &self.speed
    }
}

/// Directed street network. Topology and edge attributes never change once
/// built; per-refresh costs live in [`crate::snapshot::EdgeCosts`].
#[derive(Debug)]
pub struct StreetGraph {
    nodes: Vec<StreetNode>,
    edges: Vec<StreetEdge>,
    adjacency_list: Vec<Vec<usize>>,
    node_ids: FxHashMap<i64, usize>,
}

impl StreetGraph {
    pub fn new(nodes: Vec<StreetNode>) -> Result<Self, GraphStoreError> {
        let mut node_ids = FxHashMap::default();
        node_ids.reserve(nodes.len());

        for (index, node) in nodes.iter().enumerate() {
            if !node.point.is_valid() {
                return Err(GraphStoreError::InvalidCoordinates(node.id));
            }
            if node_ids.insert(node.id, index).is_some() {
                return Err(GraphStoreError::DuplicateNode(node.id));
            }
        }

        Ok(StreetGraph {
            adjacency_list: vec![vec![]; nodes.len()],
            nodes,
            edges: vec![],
            node_ids,
        })
    }

    /// Adds a directed edge between two provider node ids.
    pub fn add_edge(
        &mut self,
        from: i64,
        to: i64,
        distance: Distance<Meters>,
        speed: DeclaredSpeed,
    ) -> Result<usize, GraphStoreError> {
        let edge_id = self.edges.len();

        let start_node = self.node_index(from).ok_or(GraphStoreError::InvalidEdge {
            edge: edge_id,
            node: from,
        })?;
        let end_node = self.node_index(to).ok_or(GraphStoreError::InvalidEdge {
            edge: edge_id,
            node: to,
        })?;

        if distance.is_negative() {
            return Err(GraphStoreError::NegativeLength(edge_id));
        }

        self.edges
            .push(StreetEdge::new(start_node, end_node, distance, speed));
        self.adjacency_list[start_node].push(edge_id);

        Ok(edge_id)
    }

    pub fn node_index(&self, id: i64) -> Option<usize> {
        self.node_ids.get(&id).copied()
    }

    pub fn node(&self, node: usize) -> &StreetNode {
        &self.nodes[node]
    }

    pub fn nodes(&self) -> &[StreetNode] {
        &self.nodes
    }

    pub fn node_geometry(&self, node: usize) -> &GeoPoint {
        &self.nodes[node].point
    }

    pub fn edge(&self, edge: usize) -> &StreetEdge {
        &self.edges[edge]
    }

    pub fn edges(&self) -> &[StreetEdge] {
        &self.edges
    }

    /// Outgoing edges of `node`.
    pub fn node_edges(&self, node: usize) -> &[usize] {
        &self.adjacency_list[node]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meters;

    fn nodes() -> Vec<StreetNode> {
        vec![
            StreetNode {
                id: 10,
                point: GeoPoint::new(41.0, 2.0),
            },
            StreetNode {
                id: 20,
                point: GeoPoint::new(41.001, 2.0),
            },
        ]
    }

    #[test]
    fn test_add_edge_is_directed() {
        let mut graph = StreetGraph::new(nodes()).unwrap();
        let edge = graph
            .add_edge(10, 20, meters!(111), DeclaredSpeed::Missing)
            .unwrap();

        assert_eq!(graph.node_edges(0), &[edge]);
        assert!(graph.node_edges(1).is_empty());
        assert_eq!(graph.edge(edge).end_node(), 1);
    }

    #[test]
    fn test_add_edge_with_unknown_node() {
        let mut graph = StreetGraph::new(nodes()).unwrap();
        let result = graph.add_edge(10, 30, meters!(1), DeclaredSpeed::Missing);

        assert!(matches!(
            result,
            Err(GraphStoreError::InvalidEdge { node: 30, .. })
        ));
    }

    #[test]
    fn test_duplicate_node() {
        let mut nodes = nodes();
        nodes[1].id = 10;
        assert!(matches!(
            StreetGraph::new(nodes),
            Err(GraphStoreError::DuplicateNode(10))
        ));
    }

    #[test]
    fn test_out_of_range_node() {
        let mut nodes = nodes();
        nodes[1].point = GeoPoint::new(95.0, 2.0);
        assert!(matches!(
            StreetGraph::new(nodes),
            Err(GraphStoreError::InvalidCoordinates(20))
        ));
    }

    #[test]
    fn test_negative_length() {
        let mut graph = StreetGraph::new(nodes()).unwrap();
        let result = graph.add_edge(10, 20, meters!(-1), DeclaredSpeed::Missing);
        assert!(matches!(result, Err(GraphStoreError::NegativeLength(0))));
    }
}
