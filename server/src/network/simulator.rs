//! Congestion and failure simulation.
//!
//! Randomness is drawn through the [`RandomSource`] trait so tests can
//! script the exact sequence of draws. Every [`rand::Rng`] is a
//! [`RandomSource`].

use rand::Rng;

use crate::network::graph::{Graph, Latency, FAILED_LINK_LATENCY};

/// Smallest latency spike applied by a congestion event.
pub const MIN_SPIKE_MS: Latency = 5;

/// Number of distinct spike sizes, spikes fall in `[5, 24]`.
const SPIKE_RANGE: usize = 20;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns a value in `0..upper`. Callers never pass zero.
    fn below(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// A latency spike applied to a single link.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CongestionEvent {
    /// The node whose adjacency entry was picked.
    pub from: usize,

    /// The other end of the link.
    pub to: usize,

    /// Milliseconds added to the link latency.
    pub increase: Latency,
}

/// Applies between one and `node_count` random latency spikes.
///
/// Each attempt picks a random node; a node without links turns the
/// attempt into a no-op. Otherwise one of its links, picked at random,
/// gets a spike in `[5, 24]` ms on both directions.
///
/// # Returns
/// The applied events, in order. Empty for a graph with no nodes.
pub fn simulate_random_congestion<R: RandomSource + ?Sized>(
    graph: &mut Graph,
    rng: &mut R,
) -> Vec<CongestionEvent> {
    let node_count = graph.node_count();
    if node_count == 0 {
        network_warn!("(simulate_random_congestion) network has no servers.");
        return Vec::new();
    }

    let attempts = rng.below(node_count) + 1;
    network_info!(
        "(simulate_random_congestion) {} disturbance attempts.",
        attempts
    );

    let mut events = Vec::new();
    for _ in 0..attempts {
        let from = rng.below(node_count);
        let degree = graph.neighbors(from).len();
        if degree == 0 {
            network_debug!(
                "(simulate_random_congestion) server {} has no links, skipping.",
                from
            );
            continue;
        }

        let slot = rng.below(degree);
        let increase = rng.below(SPIKE_RANGE) as Latency + MIN_SPIKE_MS;
        let Some(to) = graph.increase_latency_at(from, slot, increase) else {
            continue;
        };

        network_debug!(
            "(simulate_random_congestion) latency spike between {} and {} (+{} ms).",
            from,
            to,
            increase
        );
        events.push(CongestionEvent { from, to, increase });
    }

    events
}

/// Marks the `u`-`v` link as failed by raising its latency to
/// [`FAILED_LINK_LATENCY`].
///
/// The link stays in the graph and remains usable when it is the only
/// way through. Returns whether the link exists.
pub fn simulate_failure(graph: &mut Graph, u: usize, v: usize) -> bool {
    let found = graph.update_latency(u, v, FAILED_LINK_LATENCY);
    if found {
        network_warn!("(simulate_failure) link {} <-> {} failed.", u, v);
    }
    found
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of draws.
    pub(crate) struct ScriptedSource {
        draws: VecDeque<usize>,
    }

    impl ScriptedSource {
        pub(crate) fn new(draws: &[usize]) -> Self {
            ScriptedSource {
                draws: draws.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn below(&mut self, upper: usize) -> usize {
            let Some(draw) = self.draws.pop_front() else {
                panic!("scripted source ran out of draws");
            };
            assert!(draw < upper, "scripted draw {} not below {}", draw, upper);
            draw
        }
    }

    fn sample_graph() -> Graph {
        let mut graph = Graph::new(4);
        graph.add_link(0, 1, 5);
        graph.add_link(1, 2, 5);
        graph.add_link(0, 2, 20);
        graph
    }

    #[test]
    fn test_scripted_congestion() {
        let mut graph = sample_graph();
        // 2 attempts; node 2 slot 1 (+5+3); node 0 slot 0 (+5+19)
        let mut rng = ScriptedSource::new(&[1, 2, 1, 3, 0, 0, 19]);

        let events = simulate_random_congestion(&mut graph, &mut rng);

        assert_eq!(
            events,
            vec![
                CongestionEvent {
                    from: 2,
                    to: 0,
                    increase: 8
                },
                CongestionEvent {
                    from: 0,
                    to: 1,
                    increase: 24
                },
            ]
        );
        assert_eq!(graph.latency(0, 2), Some(28));
        assert_eq!(graph.latency(2, 0), Some(28));
        assert_eq!(graph.latency(0, 1), Some(29));
        assert_eq!(graph.latency(1, 0), Some(29));
        assert_eq!(graph.latency(1, 2), Some(5));
    }

    #[test]
    fn test_isolated_nodes_are_skipped() {
        let mut graph = sample_graph();
        // 3 attempts, all on the isolated node 3
        let mut rng = ScriptedSource::new(&[2, 3, 3, 3]);
        let before = graph.links();

        let events = simulate_random_congestion(&mut graph, &mut rng);

        assert!(events.is_empty());
        assert_eq!(graph.links(), before);
    }

    #[test]
    fn test_empty_graph_has_no_events() {
        let mut graph = Graph::new(0);
        let mut rng = ScriptedSource::new(&[]);

        assert!(simulate_random_congestion(&mut graph, &mut rng).is_empty());
    }

    #[test]
    fn test_random_congestion_bounds() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut graph = sample_graph();
            let before: Latency = graph.links().iter().map(|l| l.latency).sum();

            let events = simulate_random_congestion(&mut graph, &mut rng);

            assert!(events.len() <= graph.node_count());
            for event in &events {
                assert!((5..=24).contains(&event.increase));
                assert_eq!(graph.latency(event.from, event.to), graph.latency(event.to, event.from));
            }

            let after: Latency = graph.links().iter().map(|l| l.latency).sum();
            let total: Latency = events.iter().map(|e| e.increase).sum();
            assert_eq!(after - before, total);
        }
    }

    #[test]
    fn test_simulate_failure() {
        let mut graph = sample_graph();

        assert!(simulate_failure(&mut graph, 1, 0));
        assert_eq!(graph.latency(0, 1), Some(FAILED_LINK_LATENCY));
        assert_eq!(graph.latency(1, 0), Some(FAILED_LINK_LATENCY));

        assert!(!simulate_failure(&mut graph, 0, 3));
        assert_eq!(graph.link_count(), 3);
    }
}
