//! Guards results from superseded fetch cycles.
//!
//! Aggregation loaders run several backend calls and only then commit an
//! assembled result. When a newer cycle starts for the same user (a month
//! change, a refresh), the older cycle's result must be discarded instead of
//! committed, otherwise a slow response can overwrite a newer one. Loaders
//! take a [FetchToken] from the shared [FetchGate] and check it is still
//! current before committing.
//!
//! Generations are tracked per user: one user's page load never supersedes
//! another user's in-flight load.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

/// Issues fetch tokens and remembers which generation is current for each
/// user.
#[derive(Debug, Clone, Default)]
pub(crate) struct FetchGate {
    generations: Arc<Mutex<HashMap<i64, Arc<AtomicU64>>>>,
}

/// A claim on one fetch cycle. Valid until the gate begins a newer cycle for
/// the same user.
#[derive(Debug)]
pub(crate) struct FetchToken {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl FetchGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch cycle for `user_id`, invalidating that user's
    /// outstanding tokens and nobody else's.
    pub(crate) fn begin(&self, user_id: i64) -> FetchToken {
        let counter = {
            let mut generations = self
                .generations
                .lock()
                .expect("the fetch gate mutex was poisoned");

            Arc::clone(generations.entry(user_id).or_default())
        };

        let generation = counter.fetch_add(1, Ordering::SeqCst) + 1;

        FetchToken { generation, counter }
    }
}

impl FetchToken {
    /// Whether this token still belongs to its user's newest fetch cycle.
    pub(crate) fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod fetch_gate_tests {
    use super::FetchGate;

    #[test]
    fn a_fresh_token_is_current() {
        let gate = FetchGate::new();

        let token = gate.begin(1);

        assert!(token.is_current());
    }

    #[test]
    fn a_newer_cycle_supersedes_older_tokens() {
        let gate = FetchGate::new();

        let first = gate.begin(1);
        let second = gate.begin(1);

        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn another_users_cycle_does_not_supersede() {
        let gate = FetchGate::new();

        let first_user = gate.begin(1);
        let second_user = gate.begin(2);
        gate.begin(2);

        assert!(first_user.is_current());
        assert!(!second_user.is_current());
    }

    #[test]
    fn tokens_from_different_gates_are_independent() {
        let chart_gate = FetchGate::new();
        let cards_gate = FetchGate::new();

        let chart_token = chart_gate.begin(1);
        cards_gate.begin(1);
        cards_gate.begin(1);

        assert!(chart_token.is_current());
    }
}
