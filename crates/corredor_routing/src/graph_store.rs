use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::distance::{Distance, Meters};
use crate::error::GraphStoreError;
use crate::geopoint::GeoPoint;
use crate::graph::{StreetGraph, StreetNode};
use crate::speed::DeclaredSpeed;

/// Source of the base street network.
pub trait GraphStore {
    fn load(&self) -> Result<StreetGraph, GraphStoreError>;
}

#[derive(Deserialize)]
struct RawNode {
    id: i64,
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawEdge {
    from: i64,
    to: i64,
    length: Distance<Meters>,
    #[serde(default)]
    maxspeed: DeclaredSpeed,
}

#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl TryFrom<RawGraph> for StreetGraph {
    type Error = GraphStoreError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(|node| StreetNode {
                id: node.id,
                point: GeoPoint::new(node.lat, node.lng),
            })
            .collect();

        let mut graph = StreetGraph::new(nodes)?;
        for edge in raw.edges {
            graph.add_edge(edge.from, edge.to, edge.length, edge.maxspeed)?;
        }

        Ok(graph)
    }
}

/// Street graph exported as JSON:
/// `{"nodes": [{"id", "lat", "lng"}], "edges": [{"from", "to", "length", "maxspeed"}]}`.
pub struct JsonGraphStore {
    path: PathBuf,
}

impl JsonGraphStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonGraphStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<StreetGraph, GraphStoreError> {
        let raw: RawGraph = serde_json::from_str(content)?;
        raw.try_into()
    }
}

impl GraphStore for JsonGraphStore {
    fn load(&self) -> Result<StreetGraph, GraphStoreError> {
        info!(path = %self.path.display(), "Loading street graph");

        let file = File::open(&self.path)?;
        let raw: RawGraph = serde_json::from_reader(BufReader::new(file))?;
        let graph: StreetGraph = raw.try_into()?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Loaded street graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{
        "nodes": [
            {"id": 100, "lat": 41.380, "lng": 2.150},
            {"id": 200, "lat": 41.381, "lng": 2.150},
            {"id": 300, "lat": 41.382, "lng": 2.150}
        ],
        "edges": [
            {"from": 100, "to": 200, "length": 111.2, "maxspeed": "50"},
            {"from": 200, "to": 300, "length": 111.2, "maxspeed": ["30", "50"]},
            {"from": 300, "to": 200, "length": 111.2}
        ]
    }"#;

    #[test]
    fn test_parse() {
        let graph = JsonGraphStore::parse(GRAPH).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge(0).speed(), &DeclaredSpeed::Single(50.0));
        assert_eq!(graph.edge(1).speed().effective_speed_kmh(), 40.0);
        assert_eq!(graph.edge(2).speed(), &DeclaredSpeed::Missing);
        assert_eq!(graph.edge(1).distance().value(), 111.2);
    }

    #[test]
    fn test_unknown_node() {
        let content = r#"{"nodes": [{"id": 1, "lat": 41.0, "lng": 2.0}], "edges": [{"from": 1, "to": 2, "length": 5}]}"#;
        assert!(matches!(
            JsonGraphStore::parse(content),
            Err(GraphStoreError::InvalidEdge { node: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let store = JsonGraphStore::new("/nonexistent/graph.json");
        assert!(matches!(store.load(), Err(GraphStoreError::Io(_))));
    }
}
