use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};

use crate::congestion::{CongestionLevel, TrafficSegment};
use crate::congestion_mapper::map_congestion;
use crate::graph::StreetGraph;
use crate::location_index::LocationIndex;
use crate::stopwatch::Stopwatch;
use crate::travel_time::calculate_itimes;

/// Per-edge congestion and travel time of one refresh epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCosts {
    congestion: Vec<CongestionLevel>,
    itime: Vec<f64>,
}

impl EdgeCosts {
    pub fn new(graph: &StreetGraph, congestion: Vec<CongestionLevel>) -> Self {
        let itime = calculate_itimes(graph, &congestion);
        EdgeCosts { congestion, itime }
    }

    /// Costs with every edge at level 0.
    pub fn without_congestion(graph: &StreetGraph) -> Self {
        Self::new(graph, vec![CongestionLevel::NO_DATA; graph.edge_count()])
    }

    pub fn congestion(&self, edge_id: usize) -> CongestionLevel {
        self.congestion[edge_id]
    }

    pub fn itime(&self, edge_id: usize) -> f64 {
        self.itime[edge_id]
    }

    pub fn congestion_levels(&self) -> &[CongestionLevel] {
        &self.congestion
    }

    pub fn itimes(&self) -> &[f64] {
        &self.itime
    }

    pub fn level_histogram(&self) -> [usize; 7] {
        let mut histogram = [0; 7];
        for level in &self.congestion {
            histogram[level.index()] += 1;
        }
        histogram
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStatus {
    pub version: u64,
    pub built_at: Timestamp,
    pub segments: usize,
    pub edges_per_level: [usize; 7],
}

/// Fully costed routable graph. Never mutated once built.
pub struct GraphSnapshot {
    version: u64,
    built_at: Timestamp,
    segments: usize,
    graph: Arc<StreetGraph>,
    index: Arc<LocationIndex>,
    costs: EdgeCosts,
}

impl GraphSnapshot {
    /// Version 0: every edge costed at level 0.
    pub fn initial(graph: Arc<StreetGraph>, index: Arc<LocationIndex>) -> Self {
        let costs = EdgeCosts::without_congestion(&graph);
        GraphSnapshot {
            version: 0,
            built_at: Timestamp::now(),
            segments: 0,
            graph,
            index,
            costs,
        }
    }

    /// Maps `segments` onto the shared topology and costs every edge. The
    /// topology and index are shared with the previous snapshot.
    pub fn build(
        graph: Arc<StreetGraph>,
        index: Arc<LocationIndex>,
        segments: &[TrafficSegment],
        version: u64,
    ) -> Self {
        let mapping_sw = Stopwatch::new("snapshot/map_congestion");
        let congestion = map_congestion(&graph, &index, segments);
        mapping_sw.report();

        let costing_sw = Stopwatch::new("snapshot/itime");
        let costs = EdgeCosts::new(&graph, congestion);
        costing_sw.report();

        GraphSnapshot {
            version,
            built_at: Timestamp::now(),
            segments: segments.len(),
            graph,
            index,
            costs,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn built_at(&self) -> Timestamp {
        self.built_at
    }

    pub fn graph(&self) -> &Arc<StreetGraph> {
        &self.graph
    }

    pub fn index(&self) -> &Arc<LocationIndex> {
        &self.index
    }

    pub fn costs(&self) -> &EdgeCosts {
        &self.costs
    }

    pub fn status(&self) -> SnapshotStatus {
        SnapshotStatus {
            version: self.version,
            built_at: self.built_at,
            segments: self.segments,
            edges_per_level: self.costs.level_histogram(),
        }
    }
}

/// Owns the currently published snapshot.
///
/// Readers clone the `Arc` and release the lock immediately, so a path search
/// never holds the lock and never observes a partially refreshed graph. A
/// replaced snapshot lives on until the last in-flight query drops it.
pub struct SnapshotManager {
    current: RwLock<Arc<GraphSnapshot>>,
}

impl SnapshotManager {
    pub fn new(initial: GraphSnapshot) -> Self {
        SnapshotManager {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Takes the read lock for the `Arc` clone only. Not lock-free: a reader
    /// can wait on a concurrent `publish`, which holds the write lock just
    /// for the pointer swap.
    pub fn current(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn next_version(&self) -> u64 {
        self.current.read().version() + 1
    }

    /// Atomically replaces the current snapshot. Returns `false` and keeps the
    /// current one if `snapshot` is not newer.
    pub fn publish(&self, snapshot: GraphSnapshot) -> bool {
        let mut current = self.current.write();

        if snapshot.version() <= current.version() {
            warn!(
                current = current.version(),
                rejected = snapshot.version(),
                "Refusing to publish stale snapshot"
            );
            return false;
        }

        info!(
            version = snapshot.version(),
            segments = snapshot.segments,
            "Publishing graph snapshot"
        );
        *current = Arc::new(snapshot);
        true
    }
}
