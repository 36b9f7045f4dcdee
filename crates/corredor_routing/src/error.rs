use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Could not resolve location \"{0}\"")]
    Resolution(String),
    #[error("No path available")]
    Unreachable,
    #[error("Street graph has no nodes")]
    EmptyGraph,
    #[error("Invalid node {0}")]
    InvalidNode(usize),
    #[error("Coordinates out of range: {lat}, {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("Geocoder failed: {0}")]
    Geocode(#[from] GeocodeError),
    #[error("Path search failed: {0}")]
    Search(String),
}

#[derive(Error, Debug)]
pub enum GraphStoreError {
    #[error("Failed to read graph file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to deserialize graph: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("Edge {edge} references unknown node {node}")]
    InvalidEdge { edge: usize, node: i64 },
    #[error("Edge {0} has a negative length")]
    NegativeLength(usize),
    #[error("Duplicate node id {0}")]
    DuplicateNode(i64),
    #[error("Node {0} has coordinates out of range")]
    InvalidCoordinates(i64),
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Request(String),
    #[error("Feed timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Feed returned status {0}")]
    Status(u16),
    #[error("Malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("Invalid congestion level {level} for segment {segment_id}")]
    InvalidCongestionLevel { segment_id: i64, level: i64 },
    #[error("Refresh task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),
    #[error("Geocoder timed out")]
    Timeout,
}
