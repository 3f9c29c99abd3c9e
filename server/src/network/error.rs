//! Error types for the network session.

use std::fmt::{Display, Formatter, Result};

/// Error types for requests rejected before they reach the graph.
///
/// A rejected request never changes the network state.
///
/// # Errors
/// * `InvalidIndex` - A node index outside of `[0, node_count)`
/// * `InvalidLatency` - A negative latency, or one above the failed-link latency
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The node index does not exist in this network.
    ///
    /// Expected message: "Invalid server index {index} (network has {node_count} servers)"
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of nodes in the network.
        node_count: usize,
    },

    /// Latencies are measured in milliseconds, from 0 up to
    /// [`FAILED_LINK_LATENCY`](crate::network::FAILED_LINK_LATENCY).
    ///
    /// Expected message: "Invalid latency {latency} ms"
    InvalidLatency(i64),
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            NetworkError::InvalidIndex { index, node_count } => write!(
                f,
                "Invalid server index {} (network has {} servers)",
                index, node_count
            ),
            NetworkError::InvalidLatency(latency) => write!(f, "Invalid latency {} ms", latency),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Outcome of a latency mutation targeting a specific link.
///
/// A missing link is not an error; the caller reports it and moves on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LinkUpdate {
    /// The link was found and its latency was replaced.
    Updated,
    /// There is no link between the two servers.
    LinkNotFound,
}

impl Display for LinkUpdate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            LinkUpdate::Updated => write!(f, "Link latency updated successfully."),
            LinkUpdate::LinkNotFound => write!(f, "Link not found."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = NetworkError::InvalidIndex {
            index: 9,
            node_count: 4,
        };
        assert_eq!(
            error.to_string(),
            "Invalid server index 9 (network has 4 servers)"
        );
        assert_eq!(
            NetworkError::InvalidLatency(-3).to_string(),
            "Invalid latency -3 ms"
        );
        assert_eq!(LinkUpdate::LinkNotFound.to_string(), "Link not found.");
    }
}
