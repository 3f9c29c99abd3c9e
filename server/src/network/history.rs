//! Memory of the most recent route query.

use crate::network::engine::RouteResult;
use crate::network::graph::Latency;

/// Change in latency between two queries from the same source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RouteDelta {
    /// Latency reported by the previous query.
    pub previous: Latency,

    /// Latency reported by the current query.
    pub current: Latency,

    /// `current - previous`: positive got worse, negative improved.
    pub change: i64,
}

impl RouteDelta {
    fn new(previous: Latency, current: Latency) -> Self {
        let change = if current >= previous {
            i64::try_from(current - previous).unwrap_or(i64::MAX)
        } else {
            i64::try_from(previous - current).map_or(i64::MIN, |diff| -diff)
        };

        RouteDelta {
            previous,
            current,
            change,
        }
    }
}

/// Holds at most one [`RouteResult`], the last one recorded.
#[derive(Debug, Clone, Default)]
pub struct RouteHistory {
    last: Option<RouteResult>,
}

impl RouteHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently recorded result.
    pub fn last(&self) -> Option<&RouteResult> {
        self.last.as_ref()
    }

    /// Compares `current` against the stored result for `destination`.
    ///
    /// A delta is only available when both results share the same source
    /// and both reach `destination`. Call this before [`Self::record`].
    pub fn compare_to_last(&self, current: &RouteResult, destination: usize) -> Option<RouteDelta> {
        let last = self.last.as_ref()?;
        if last.source() != current.source() {
            return None;
        }

        let previous = last.distance_to(destination)?;
        let now = current.distance_to(destination)?;
        Some(RouteDelta::new(previous, now))
    }

    /// Replaces the stored result, whatever it was.
    pub fn record(&mut self, result: RouteResult) {
        self.last = Some(result);
    }
}
