//! Projects traffic segment readings onto street graph edges.
//!
//! Segment geometries come from an independent survey and rarely line up
//! with graph nodes. Every vertex of a segment is snapped to its nearest
//! node and consecutive snapped nodes are joined by the shortest path by
//! length. The edges of those paths form the segment's corridor. This is a
//! best-effort alignment, not an exact spatial join.

use rayon::prelude::*;
use tracing::debug;

use crate::congestion::{CongestionLevel, TrafficSegment};
use crate::dijkstra::Dijkstra;
use crate::graph::StreetGraph;
use crate::location_index::LocationIndex;
use crate::weighting::LengthWeighting;

/// Edges judged to physically correspond to `segment`, in travel order.
pub fn segment_corridor(
    graph: &StreetGraph,
    index: &LocationIndex,
    dijkstra: &mut Dijkstra,
    segment: &TrafficSegment,
) -> Vec<usize> {
    if segment.coordinates.len() < 2 {
        return vec![];
    }

    let mut snapped: Vec<usize> = segment
        .coordinates
        .iter()
        .filter_map(|point| index.closest_node(point))
        .collect();
    snapped.dedup();

    let mut corridor = vec![];

    for pair in snapped.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        match dijkstra.calc_path(graph, &LengthWeighting, from, to) {
            Ok(Some(path)) => corridor.extend(path.edges),
            Ok(None) => {
                debug!(segment_id = segment.id, from, to, "No corridor between snapped nodes");
            }
            Err(err) => {
                debug!(segment_id = segment.id, %err, "Skipping corridor pair");
            }
        }
    }

    corridor
}

/// Returns one congestion level per edge of `graph`. Edges covered by no
/// segment stay at level 0. Where corridors overlap the segment with the
/// highest id wins, independently of the input order.
pub fn map_congestion(
    graph: &StreetGraph,
    index: &LocationIndex,
    segments: &[TrafficSegment],
) -> Vec<CongestionLevel> {
    let mut ordered: Vec<&TrafficSegment> = segments.iter().collect();
    ordered.sort_by_key(|segment| segment.id);

    let corridors: Vec<(CongestionLevel, Vec<usize>)> = ordered
        .par_iter()
        .map_init(Dijkstra::new, |dijkstra, segment| {
            (
                segment.level,
                segment_corridor(graph, index, dijkstra, segment),
            )
        })
        .collect();

    let mut congestion = vec![CongestionLevel::NO_DATA; graph.edge_count()];
    let mut touched = 0;

    for (level, corridor) in corridors {
        touched += corridor.len();
        for edge_id in corridor {
            congestion[edge_id] = level;
        }
    }

    debug!(
        segments = segments.len(),
        edges = touched,
        "Mapped congestion onto street graph"
    );

    congestion
}
