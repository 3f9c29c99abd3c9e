//! Latency routing core.
//!
//! A [`Network`] holds a fixed set of servers connected by undirected
//! links with a latency cost. Routes are computed on demand with
//! Dijkstra's algorithm and compared against the previous route from
//! the same source.

#[macro_use]
pub mod macros;
pub mod demo;
pub mod engine;
pub mod error;
pub mod graph;
pub mod history;
pub mod session;
pub mod simulator;

pub use error::{LinkUpdate, NetworkError};
pub use graph::{Latency, Link, FAILED_LINK_LATENCY};
pub use history::RouteDelta;
pub use session::{Network, RouteReport};
pub use simulator::{CongestionEvent, RandomSource};
