use crate::congestion::CongestionLevel;
use crate::graph::StreetGraph;
use crate::snapshot::EdgeCosts;

pub type Weight = f64;

pub trait Weighting {
    /// Cost of traversing `edge_id`, `None` if the edge must not be used.
    fn calc_edge_weight(&self, graph: &StreetGraph, edge_id: usize) -> Option<Weight>;
}

/// Geometric length in meters, used to approximate segment corridors.
pub struct LengthWeighting;

impl Weighting for LengthWeighting {
    #[inline(always)]
    fn calc_edge_weight(&self, graph: &StreetGraph, edge_id: usize) -> Option<Weight> {
        Some(graph.edge(edge_id).distance().value())
    }
}

/// Congestion-aware travel time. Blocked edges are never traversed.
pub struct ITimeWeighting<'a> {
    costs: &'a EdgeCosts,
}

impl<'a> ITimeWeighting<'a> {
    pub fn new(costs: &'a EdgeCosts) -> Self {
        ITimeWeighting { costs }
    }
}

impl Weighting for ITimeWeighting<'_> {
    #[inline(always)]
    fn calc_edge_weight(&self, _graph: &StreetGraph, edge_id: usize) -> Option<Weight> {
        if self.costs.congestion(edge_id) == CongestionLevel::BLOCKED {
            return None;
        }

        Some(self.costs.itime(edge_id))
    }
}
