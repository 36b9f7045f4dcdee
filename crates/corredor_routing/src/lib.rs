pub mod congestion;
pub mod congestion_mapper;
pub mod constants;
pub mod dijkstra;
pub mod distance;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod graph_store;
pub mod location;
pub mod location_index;
pub mod path_finder;
pub mod refresh;
pub mod router;
pub mod routing_path;
pub mod snapshot;
pub mod speed;
pub mod stopwatch;
pub mod travel_time;
pub mod weighting;
