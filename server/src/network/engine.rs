//! The routing engine.
//!
//! Computes single-source shortest paths over a [`Graph`] with
//! Dijkstra's algorithm. All latencies are non-negative, so the first
//! time a node is popped from the heap with its best known distance,
//! that distance is final.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::network::graph::{Graph, Latency};

/// Search state of a node during a shortest-path run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum NodeLabel {
    /// Not discovered yet.
    Unvisited,
    /// In the heap with a tentative distance.
    Frontier,
    /// Distance is final.
    Settled,
}

/// Shortest distances and predecessors from a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    source: usize,
    distances: Vec<Option<Latency>>,
    parents: Vec<Option<usize>>,
}

impl RouteResult {
    /// The node the search started from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance per node, [`None`] if unreachable.
    pub fn distances(&self) -> &[Option<Latency>] {
        &self.distances
    }

    /// Predecessor per node on a shortest path, [`None`] for the source
    /// and for unreachable nodes.
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Shortest distance to `destination`.
    pub fn distance_to(&self, destination: usize) -> Option<Latency> {
        self.distances.get(destination).copied().flatten()
    }

    /// Shortest path from the source to `destination`, both included.
    ///
    /// Returns [`None`] if `destination` can't be reached.
    pub fn path_to(&self, destination: usize) -> Option<Vec<usize>> {
        self.distance_to(destination)?;
        Some(reconstruct_path(destination, &self.parents))
    }
}

/// Runs Dijkstra's algorithm from `source`.
///
/// # Arguments
/// * `graph` - The network to search.
/// * `source` - Index of the starting node, must be below
///   [`Graph::node_count`].
///
/// # Returns
/// A [`RouteResult`] with one entry per node. Ties between equally
/// short paths are broken by discovery order.
///
/// # Time Complexity
/// *O*((*V* + *E*) log *V*) with a binary heap and lazy deletion.
pub fn shortest_paths(graph: &Graph, source: usize) -> RouteResult {
    let node_count = graph.node_count();
    let mut distances: Vec<Option<Latency>> = vec![None; node_count];
    let mut parents: Vec<Option<usize>> = vec![None; node_count];
    let mut labels = vec![NodeLabel::Unvisited; node_count];
    let mut heap = BinaryHeap::new();

    distances[source] = Some(0);
    labels[source] = NodeLabel::Frontier;
    heap.push(Reverse((0, source)));

    let mut settled = 0;
    while let Some(Reverse((distance, u))) = heap.pop() {
        // Skip stale entries whose distance was already improved.
        if labels[u] == NodeLabel::Settled || distances[u].map_or(true, |best| distance > best) {
            continue;
        }
        labels[u] = NodeLabel::Settled;
        settled += 1;

        for link in graph.neighbors(u) {
            let v = link.neighbor;
            if labels[v] == NodeLabel::Settled {
                continue;
            }

            let candidate = distance.saturating_add(link.latency);
            if distances[v].map_or(true, |best| candidate < best) {
                distances[v] = Some(candidate);
                parents[v] = Some(u);
                labels[v] = NodeLabel::Frontier;
                heap.push(Reverse((candidate, v)));
            }
        }
    }

    network_debug!(
        "(shortest_paths) source {} settled {} of {} nodes.",
        source,
        settled,
        node_count
    );

    RouteResult {
        source,
        distances,
        parents,
    }
}

/// Walks the predecessor chain from `destination` back to a node with
/// no predecessor and returns it in source-to-destination order.
///
/// For an unreachable destination the result is just `[destination]`;
/// check the distance first.
pub fn reconstruct_path(destination: usize, parents: &[Option<usize>]) -> Vec<usize> {
    let mut path = vec![destination];
    let mut current = destination;

    while let Some(parent) = parents.get(current).copied().flatten() {
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}
