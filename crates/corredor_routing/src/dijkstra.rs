use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use tracing::trace;

use crate::constants::{INVALID_EDGE, INVALID_NODE};
use crate::error::RoutingError;
use crate::graph::StreetGraph;
use crate::weighting::{Weight, Weighting};

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node_id: usize,
    weight: Weight,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

struct NodeData {
    weight: Weight,
    settled: bool,
    parent: usize,
    edge_id: usize, // Edge ID from parent to current node
}

impl NodeData {
    fn new() -> Self {
        NodeData {
            settled: false,
            weight: Weight::INFINITY,
            parent: INVALID_NODE,
            edge_id: INVALID_EDGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub nodes: Vec<usize>,
    pub edges: Vec<usize>,
    pub weight: Weight,
}

pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,
    // Sparse: most searches only touch a small part of the city.
    data: FxHashMap<usize, NodeData>,
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra {
            heap: BinaryHeap::with_capacity(1024),
            data: FxHashMap::default(),
        }
    }

    fn init(&mut self, start: usize) {
        self.heap.clear();
        self.data.clear();
        self.heap.push(HeapItem {
            node_id: start,
            weight: 0.0,
        });
        self.update_node_data(start, 0.0, INVALID_NODE, INVALID_EDGE);
    }

    fn update_node_data(&mut self, node: usize, weight: Weight, parent: usize, edge_id: usize) {
        let data = self.data.entry(node).or_insert_with(NodeData::new);
        data.weight = weight;
        data.parent = parent;
        data.edge_id = edge_id;
    }

    #[inline(always)]
    fn is_settled(&self, node: usize) -> bool {
        self.data.get(&node).is_some_and(|data| data.settled)
    }

    #[inline(always)]
    fn current_shortest_weight(&self, node: usize) -> Weight {
        self.data
            .get(&node)
            .map_or(Weight::INFINITY, |data| data.weight)
    }

    fn build_path(&self, end: usize) -> ShortestPath {
        let mut nodes = vec![end];
        let mut edges = vec![];

        let mut node = end;
        while let Some(data) = self.data.get(&node) {
            if data.parent == INVALID_NODE {
                break;
            }
            edges.push(data.edge_id);
            nodes.push(data.parent);
            node = data.parent;
        }

        nodes.reverse();
        edges.reverse();

        ShortestPath {
            nodes,
            edges,
            weight: self.current_shortest_weight(end),
        }
    }

    pub fn calc_path(
        &mut self,
        graph: &StreetGraph,
        weighting: &impl Weighting,
        start: usize,
        end: usize,
    ) -> Result<Option<ShortestPath>, RoutingError> {
        if start >= graph.node_count() {
            return Err(RoutingError::InvalidNode(start));
        }

        if end >= graph.node_count() {
            return Err(RoutingError::InvalidNode(end));
        }

        self.init(start);

        let mut iterations = 0;

        while let Some(HeapItem { node_id, weight }) = self.heap.pop() {
            if self.is_settled(node_id) {
                continue;
            }

            if weight > self.current_shortest_weight(node_id) {
                continue;
            }

            if let Some(data) = self.data.get_mut(&node_id) {
                data.settled = true;
            }
            iterations += 1;

            if node_id == end {
                break;
            }

            for &edge_id in graph.node_edges(node_id) {
                let adj_node = graph.edge(edge_id).end_node();

                if self.is_settled(adj_node) {
                    continue;
                }

                let Some(edge_weight) = weighting.calc_edge_weight(graph, edge_id) else {
                    continue;
                };

                let next_weight = weight + edge_weight;

                if next_weight < self.current_shortest_weight(adj_node) {
                    self.update_node_data(adj_node, next_weight, node_id, edge_id);
                    self.heap.push(HeapItem {
                        weight: next_weight,
                        node_id: adj_node,
                    });
                }
            }
        }

        trace!(iterations, "Dijkstra finished");

        if !self.is_settled(end) {
            return Ok(None);
        }

        Ok(Some(self.build_path(end)))
    }
}
