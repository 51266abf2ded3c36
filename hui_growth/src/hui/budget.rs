use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Search budget shared by all mining workers.
///
/// Counts projected-database constructions against an optional cap and
/// carries a cancellation flag. Workers stop expanding once either trips;
/// nothing already emitted is invalidated.
#[derive(Debug)]
pub struct SearchBudget {
    max_expansions: usize,
    used: AtomicUsize,
    cancelled: AtomicBool,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl SearchBudget {
    pub fn new(max_expansions: usize) -> Self {
        Self {
            max_expansions,
            used: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn from_limit(limit: Option<usize>) -> Self {
        limit.map_or_else(Self::unlimited, Self::new)
    }

    /// Reserves one expansion. Returns `false` when the budget is spent or
    /// the search was cancelled.
    pub fn try_expand(&self) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let current = self.used.fetch_add(1, Ordering::SeqCst);
        if current >= self.max_expansions {
            self.used.fetch_sub(1, Ordering::SeqCst);
            return false;
        }
        true
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn used(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    pub fn remaining(&self) -> usize {
        self.max_expansions.saturating_sub(self.used())
    }
}
