use rayon::prelude::*;

use crate::congestion::CongestionLevel;
use crate::constants::{CONGESTION_FACTORS, MIN_ITIME};
use crate::distance::{Distance, Kilometers, Meters};
use crate::graph::{StreetEdge, StreetGraph};
use crate::speed::DeclaredSpeed;

/// Travel time in hours: `length_km / speed_kmh * factor[level]`.
pub fn calculate_itime(
    distance: Distance<Meters>,
    speed: &DeclaredSpeed,
    congestion: CongestionLevel,
) -> f64 {
    let length_km = distance.convert::<Kilometers>().value();
    let itime = length_km / speed.effective_speed_kmh() * CONGESTION_FACTORS[congestion.index()];

    itime.max(MIN_ITIME)
}

pub fn edge_itime(edge: &StreetEdge, congestion: CongestionLevel) -> f64 {
    calculate_itime(edge.distance(), edge.speed(), congestion)
}

/// Costs every edge of `graph` given one congestion level per edge.
pub fn calculate_itimes(graph: &StreetGraph, congestion: &[CongestionLevel]) -> Vec<f64> {
    debug_assert_eq!(graph.edge_count(), congestion.len());

    graph
        .edges()
        .par_iter()
        .zip(congestion.par_iter())
        .map(|(edge, level)| edge_itime(edge, *level))
        .collect()
}
