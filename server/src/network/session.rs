//! The caller-facing network session.
//!
//! [`Network`] owns the [`Graph`] and the [`RouteHistory`] and is the
//! only way to reach them from the outside. Every request is validated
//! here, before the graph is touched, so a rejected request never
//! leaves a partial write behind.

use crate::network::engine::shortest_paths;
use crate::network::error::{LinkUpdate, NetworkError};
use crate::network::graph::{Graph, Latency, Link, FAILED_LINK_LATENCY};
use crate::network::history::{RouteDelta, RouteHistory};
use crate::network::simulator::{self, CongestionEvent, RandomSource};

/// Answer to a route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReport {
    /// Starting server.
    pub source: usize,

    /// Target server.
    pub destination: usize,

    /// Total latency of the route, [`None`] if there is no route.
    pub distance: Option<Latency>,

    /// Servers along the route, source first. Empty if there is no route.
    pub path: Vec<usize>,

    /// Change against the previous query from the same source.
    pub comparison: Option<RouteDelta>,
}

impl RouteReport {
    /// Whether a route exists between source and destination.
    pub fn reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// A simulated server network with route history.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: Graph,
    history: RouteHistory,
}

impl Network {
    /// Creates a network of `node_count` servers with no links.
    pub fn new(node_count: usize) -> Self {
        network_info!("(new) creating network with {} servers.", node_count);
        Network {
            graph: Graph::new(node_count),
            history: RouteHistory::new(),
        }
    }

    /// Number of servers.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Read access to the route history.
    pub fn history(&self) -> &RouteHistory {
        &self.history
    }

    fn check_index(&self, index: usize) -> Result<usize, NetworkError> {
        if index < self.node_count() {
            Ok(index)
        } else {
            Err(NetworkError::InvalidIndex {
                index,
                node_count: self.node_count(),
            })
        }
    }

    /// Accepts latencies in `[0, FAILED_LINK_LATENCY]`, which keeps every
    /// path sum exact.
    fn check_latency(latency: i64) -> Result<Latency, NetworkError> {
        Latency::try_from(latency)
            .ok()
            .filter(|latency| *latency <= FAILED_LINK_LATENCY)
            .ok_or(NetworkError::InvalidLatency(latency))
    }

    /// Adds an undirected link between `u` and `v`.
    ///
    /// Parallel links and self-links are accepted as they are.
    pub fn add_link(&mut self, u: usize, v: usize, latency: i64) -> Result<(), NetworkError> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;
        let latency = Self::check_latency(latency)?;

        network_debug!("(add_link) {} <-> {} at {} ms.", u, v, latency);
        self.graph.add_link(u, v, latency);
        Ok(())
    }

    /// Sets the latency of the first `u`-`v` link in both directions.
    pub fn update_latency(
        &mut self,
        u: usize,
        v: usize,
        latency: i64,
    ) -> Result<LinkUpdate, NetworkError> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;
        let latency = Self::check_latency(latency)?;

        if self.graph.update_latency(u, v, latency) {
            network_info!("(update_latency) {} <-> {} now at {} ms.", u, v, latency);
            Ok(LinkUpdate::Updated)
        } else {
            network_warn!("(update_latency) no link between {} and {}.", u, v);
            Ok(LinkUpdate::LinkNotFound)
        }
    }

    /// Fails the first `u`-`v` link.
    ///
    /// See [`simulator::simulate_failure`].
    pub fn simulate_failure(&mut self, u: usize, v: usize) -> Result<LinkUpdate, NetworkError> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;

        if simulator::simulate_failure(&mut self.graph, u, v) {
            Ok(LinkUpdate::Updated)
        } else {
            network_warn!("(simulate_failure) no link between {} and {}.", u, v);
            Ok(LinkUpdate::LinkNotFound)
        }
    }

    /// Applies random latency spikes.
    ///
    /// See [`simulator::simulate_random_congestion`].
    pub fn simulate_random_congestion<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Vec<CongestionEvent> {
        simulator::simulate_random_congestion(&mut self.graph, rng)
    }

    /// Finds the lowest-latency route from `source` to `destination`.
    ///
    /// When a route exists the report carries the comparison against the
    /// previous query and the history is replaced by this query. A query
    /// without a route leaves the history untouched.
    pub fn compute_route(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<RouteReport, NetworkError> {
        let source = self.check_index(source)?;
        let destination = self.check_index(destination)?;

        let result = shortest_paths(&self.graph, source);
        let Some(path) = result.path_to(destination) else {
            network_info!(
                "(compute_route) no route from {} to {}.",
                source,
                destination
            );
            return Ok(RouteReport {
                source,
                destination,
                distance: None,
                path: Vec::new(),
                comparison: None,
            });
        };

        let distance = result.distance_to(destination);
        let comparison = self.history.compare_to_last(&result, destination);
        self.history.record(result);

        network_info!(
            "(compute_route) {} -> {}: {:?} ms via {:?}.",
            source,
            destination,
            distance,
            path
        );

        Ok(RouteReport {
            source,
            destination,
            distance,
            path,
            comparison,
        })
    }

    /// Every link once, lower endpoint first.
    pub fn list_links(&self) -> Vec<Link> {
        self.graph.links()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::simulator::tests::ScriptedSource;

    fn sample_network() -> Network {
        let mut network = Network::new(4);
        network.add_link(0, 1, 5).unwrap();
        network.add_link(1, 2, 5).unwrap();
        network.add_link(0, 2, 20).unwrap();
        network
    }

    #[test]
    fn test_invalid_input_is_rejected_without_change() {
        let mut network = sample_network();
        let before = network.list_links();

        assert_eq!(
            network.add_link(0, 4, 5),
            Err(NetworkError::InvalidIndex {
                index: 4,
                node_count: 4
            })
        );
        assert_eq!(
            network.add_link(0, 1, -1),
            Err(NetworkError::InvalidLatency(-1))
        );
        assert_eq!(
            network.update_latency(7, 1, 5),
            Err(NetworkError::InvalidIndex {
                index: 7,
                node_count: 4
            })
        );
        assert_eq!(
            network.update_latency(0, 1, -10),
            Err(NetworkError::InvalidLatency(-10))
        );
        assert!(network.simulate_failure(0, 9).is_err());
        assert!(network.compute_route(0, 4).is_err());

        assert_eq!(network.list_links(), before);
        assert!(network.history().last().is_none());
    }

    #[test]
    fn test_latency_upper_bound() {
        let mut network = sample_network();
        let limit = FAILED_LINK_LATENCY as i64;

        assert_eq!(
            network.add_link(0, 3, limit + 1),
            Err(NetworkError::InvalidLatency(limit + 1))
        );
        assert_eq!(
            network.update_latency(0, 1, i64::MAX),
            Err(NetworkError::InvalidLatency(i64::MAX))
        );
        assert_eq!(network.graph().latency(0, 1), Some(5));
        assert_eq!(network.update_latency(0, 1, limit), Ok(LinkUpdate::Updated));
    }

    /// Two routes made of maximal links keep exact, ordered totals.
    #[test]
    fn test_maximal_latencies_sum_exactly() {
        let mut network = Network::new(7);
        let limit = FAILED_LINK_LATENCY as i64;
        for (u, v) in [(0, 1), (1, 2), (2, 3), (0, 4), (4, 5), (5, 6), (6, 3)] {
            network.add_link(u, v, limit).unwrap();
        }

        let report = network.compute_route(0, 3).unwrap();
        assert_eq!(report.distance, Some(3 * FAILED_LINK_LATENCY));
        assert_eq!(report.path, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_update_latency_outcomes() {
        let mut network = sample_network();

        assert_eq!(network.update_latency(0, 1, 8), Ok(LinkUpdate::Updated));
        assert_eq!(network.graph().latency(0, 1), Some(8));
        assert_eq!(network.graph().latency(1, 0), Some(8));

        assert_eq!(
            network.update_latency(0, 3, 8),
            Ok(LinkUpdate::LinkNotFound)
        );
    }

    #[test]
    fn test_compute_route_concrete_scenario() {
        let mut network = sample_network();

        let report = network.compute_route(0, 2).unwrap();
        assert!(report.reachable());
        assert_eq!(report.distance, Some(10));
        assert_eq!(report.path, vec![0, 1, 2]);
        assert_eq!(report.comparison, None);

        let report = network.compute_route(0, 3).unwrap();
        assert!(!report.reachable());
        assert!(report.path.is_empty());
    }

    #[test]
    fn test_compute_route_same_node() {
        let mut network = sample_network();
        let report = network.compute_route(3, 3).unwrap();

        assert_eq!(report.distance, Some(0));
        assert_eq!(report.path, vec![3]);
    }

    #[test]
    fn test_comparison_delta_after_increase() {
        let mut network = Network::new(4);
        network.add_link(0, 1, 5).unwrap();
        network.add_link(1, 2, 5).unwrap();
        network.add_link(2, 3, 5).unwrap();

        let first = network.compute_route(0, 3).unwrap();
        assert_eq!(first.distance, Some(15));

        network.update_latency(1, 2, 15).unwrap();
        let second = network.compute_route(0, 3).unwrap();

        assert_eq!(second.distance, Some(25));
        assert_eq!(second.comparison.map(|delta| delta.change), Some(10));
        assert_eq!(second.comparison.map(|delta| delta.previous), Some(15));
    }

    #[test]
    fn test_history_tracks_last_successful_query() {
        let mut network = sample_network();

        network.compute_route(0, 2).unwrap();
        network.compute_route(1, 2).unwrap();
        assert_eq!(network.history().last().map(|r| r.source()), Some(1));

        // a query without a route keeps the previous history
        network.compute_route(3, 0).unwrap();
        assert_eq!(network.history().last().map(|r| r.source()), Some(1));

        // source changed between queries, nothing to compare to
        let report = network.compute_route(0, 2).unwrap();
        assert_eq!(report.comparison, None);

        let report = network.compute_route(0, 1).unwrap();
        assert_eq!(report.comparison.map(|delta| delta.change), Some(0));
    }

    #[test]
    fn test_failure_reroutes() {
        let mut network = sample_network();

        assert_eq!(network.simulate_failure(0, 1), Ok(LinkUpdate::Updated));
        let report = network.compute_route(0, 1).unwrap();
        assert_eq!(report.path, vec![0, 2, 1]);
        assert_eq!(report.distance, Some(25));

        assert_eq!(
            network.simulate_failure(1, 3),
            Ok(LinkUpdate::LinkNotFound)
        );
    }

    #[test]
    fn test_failure_without_alternative() {
        let mut network = Network::new(2);
        network.add_link(0, 1, 3).unwrap();
        network.simulate_failure(0, 1).unwrap();

        let report = network.compute_route(1, 0).unwrap();
        assert!(report.reachable());
        assert_eq!(report.distance, Some(FAILED_LINK_LATENCY));
    }

    #[test]
    fn test_congestion_goes_through_session() {
        let mut network = sample_network();
        let mut rng = ScriptedSource::new(&[0, 1, 0, 0]);

        let events = network.simulate_random_congestion(&mut rng);
        assert_eq!(
            events,
            vec![CongestionEvent {
                from: 1,
                to: 0,
                increase: 5
            }]
        );
        assert_eq!(network.graph().latency(0, 1), Some(10));
    }

    #[test]
    fn test_list_links_is_stable() {
        let network = sample_network();
        assert_eq!(network.list_links(), network.list_links());
        assert_eq!(network.list_links().len(), 3);
    }
}
