//! Adjacency-list storage for the server network.
//!
//! Links are undirected: every link is stored twice, once in the
//! adjacency list of each endpoint. Mutations look up the first
//! matching entry in each direction, so parallel links between the
//! same pair of servers are kept but only the first one is ever
//! updated.
//!
//! The graph trusts its callers with node indices. Validation happens
//! in [`Network`](super::session::Network) before anything reaches
//! this module.

/// Link latency in milliseconds.
pub type Latency = u64;

/// Latency assigned to a failed link.
///
/// Large enough to never win against a real route, small enough that
/// summing it along any path of a few thousand hops stays far below
/// [`Latency::MAX`].
pub const FAILED_LINK_LATENCY: Latency = u32::MAX as Latency;

/// One direction of a link, as seen from the node owning the entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Adjacency {
    /// The node at the other end of the link.
    pub neighbor: usize,

    /// Current latency of the link.
    pub latency: Latency,
}

/// An undirected link as reported for topology display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    /// Lower endpoint.
    pub from: usize,

    /// Higher endpoint.
    pub to: usize,

    /// Current latency of the link.
    pub latency: Latency,
}

/// A fixed-size set of servers connected by weighted links.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Adjacency>>,
}

impl Graph {
    /// Creates a graph of `node_count` servers with no links.
    pub fn new(node_count: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Number of servers in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected links, self-links and parallel links included.
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Links leaving `node`, in creation order.
    pub fn neighbors(&self, node: usize) -> &[Adjacency] {
        &self.adjacency[node]
    }

    /// Latency of the first `from -> to` entry, if there is one.
    pub fn latency(&self, from: usize, to: usize) -> Option<Latency> {
        self.adjacency[from]
            .iter()
            .find(|entry| entry.neighbor == to)
            .map(|entry| entry.latency)
    }

    /// Appends a bidirectional link. Duplicates and self-links are accepted.
    pub(crate) fn add_link(&mut self, u: usize, v: usize, latency: Latency) {
        self.adjacency[u].push(Adjacency {
            neighbor: v,
            latency,
        });
        self.adjacency[v].push(Adjacency {
            neighbor: u,
            latency,
        });
    }

    /// Replaces the latency of the first `u -> v` entry and of the first
    /// `v -> u` entry.
    ///
    /// Both directions are searched independently. The return value only
    /// reports whether the `u -> v` entry was found.
    pub(crate) fn update_latency(&mut self, u: usize, v: usize, latency: Latency) -> bool {
        let found = match self.adjacency[u].iter_mut().find(|entry| entry.neighbor == v) {
            Some(entry) => {
                entry.latency = latency;
                true
            }
            None => false,
        };

        if let Some(entry) = self.adjacency[v].iter_mut().find(|entry| entry.neighbor == u) {
            entry.latency = latency;
        }

        found
    }

    /// Raises the latency of the link stored at `adjacency[u][slot]` by
    /// `amount` and mirrors the increase on the first reverse entry.
    ///
    /// Returns the neighbor at the other end of the link, or [`None`] if
    /// `slot` is out of range for `u`.
    pub(crate) fn increase_latency_at(
        &mut self,
        u: usize,
        slot: usize,
        amount: Latency,
    ) -> Option<usize> {
        let entry = self.adjacency[u].get_mut(slot)?;
        entry.latency = entry.latency.saturating_add(amount);
        let v = entry.neighbor;

        if let Some(reverse) = self.adjacency[v].iter_mut().find(|entry| entry.neighbor == u) {
            reverse.latency = reverse.latency.saturating_add(amount);
        }

        Some(v)
    }

    /// Every link reported once, from its lower endpoint.
    ///
    /// Self-links have no lower endpoint and are not listed.
    pub fn links(&self) -> Vec<Link> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, entries)| {
                entries
                    .iter()
                    .filter(move |entry| from < entry.neighbor)
                    .map(move |entry| Link {
                        from,
                        to: entry.neighbor,
                        latency: entry.latency,
                    })
            })
            .collect()
    }
}
