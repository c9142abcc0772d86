//! Stale-response discard via a monotonic generation counter.
//!
//! The counter advances on every logical session change (new symbol,
//! strategy, or data source). In-flight historical and backtest requests
//! snapshot the generation at issue time and check it again before mutating
//! chart state, so a response that arrives after the user has moved on is
//! dropped instead of overwriting the new session's charts.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared monotonic counter identifying the current logical session.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicU64>,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the current generation for tagging an outbound request.
    #[must_use]
    pub fn current(&self) -> Generation {
        Generation {
            counter: self.current.clone(),
            issued: self.current.load(Ordering::SeqCst),
        }
    }

    /// Advances to a new generation, invalidating every earlier snapshot.
    pub fn advance(&self) -> Generation {
        let issued = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Generation {
            counter: self.current.clone(),
            issued,
        }
    }
}

/// Issue-time snapshot of a [`GenerationCounter`].
#[derive(Debug, Clone)]
pub struct Generation {
    counter: Arc<AtomicU64>,
    issued: u64,
}

impl Generation {
    /// Returns `true` while no newer generation has been started.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_stays_current_until_advance() {
        let counter = GenerationCounter::new();
        let generation = counter.current();
        assert!(generation.is_current());

        counter.advance();
        assert!(!generation.is_current());
    }

    #[test]
    fn advance_returns_the_new_current_generation() {
        let counter = GenerationCounter::new();
        let first = counter.advance();
        assert!(first.is_current());

        let second = counter.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn snapshots_share_one_counter_across_clones() {
        let counter = GenerationCounter::new();
        let clone = counter.clone();
        let generation = counter.current();

        clone.advance();
        assert!(!generation.is_current());
    }
}
