//! The built-in demo topology.

use crate::network::error::NetworkError;
use crate::network::session::Network;
use crate::network::simulator::RandomSource;

/// Links of the demo network. Servers above 5 are left unconnected.
pub const DEMO_LINKS: [(usize, usize); 7] = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (1, 4)];

/// Default number of servers in the demo network.
pub const DEMO_NODE_COUNT: usize = 8;

/// Smallest random latency of a demo link.
const DEMO_MIN_LATENCY_MS: i64 = 5;

/// Number of distinct demo latencies, latencies fall in `[5, 14]`.
const DEMO_LATENCY_RANGE: usize = 10;

impl Network {
    /// Builds the demo network with random link latencies.
    ///
    /// # Errors
    /// [`NetworkError::InvalidIndex`] if `node_count` is too small to hold
    /// the demo links.
    pub fn demo<R: RandomSource + ?Sized>(
        node_count: usize,
        rng: &mut R,
    ) -> Result<Network, NetworkError> {
        network_info!("(demo) generating dynamic latency profile.");

        let mut network = Network::new(node_count);
        for (u, v) in DEMO_LINKS {
            let latency = rng.below(DEMO_LATENCY_RANGE) as i64 + DEMO_MIN_LATENCY_MS;
            network.add_link(u, v, latency)?;
        }

        network_info!(
            "(demo) demo network loaded with {} links.",
            network.graph().link_count()
        );
        Ok(network)
    }
}
