//! Transaction-weighted utility (TWU) counting and the global item order.

use super::error::{check_threshold, Result};
use super::transaction::{resolve_batch, Item, Transaction, UnitUtilities, Utility};
use std::collections::HashMap;

/// Accumulates TWU over one or more transaction batches.
///
/// Every item of a transaction is credited with the utility of the whole
/// transaction, which over-counts on purpose: TWU(i) bounds the utility of any
/// itemset containing `i`.
#[derive(Debug, Clone)]
pub struct TwuAccumulator<I> {
    twu: HashMap<I, Utility>,
    num_transactions: usize,
}

impl<I: Item> Default for TwuAccumulator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> TwuAccumulator<I> {
    pub fn new() -> Self {
        Self {
            twu: HashMap::new(),
            num_transactions: 0,
        }
    }

    /// Validates the batch and adds it. Nothing is counted if any transaction
    /// is rejected.
    pub fn add_transactions(
        &mut self,
        transactions: &[Transaction<I>],
        utilities: &UnitUtilities<I>,
    ) -> Result<()> {
        let resolved = resolve_batch(transactions, utilities)?;
        self.add_resolved(&resolved);
        Ok(())
    }

    pub(crate) fn add_resolved(&mut self, resolved: &[Vec<(I, Utility)>]) {
        for transaction in resolved {
            self.num_transactions += 1;
            let transaction_utility: Utility = transaction.iter().map(|(_, u)| u).sum();
            for (item, _) in transaction {
                *self.twu.entry(item.clone()).or_insert(0.0) += transaction_utility;
            }
        }
    }

    pub fn twu(&self, item: &I) -> Option<Utility> {
        self.twu.get(item).copied()
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn distinct_items(&self) -> usize {
        self.twu.len()
    }

    pub fn into_inner(self) -> HashMap<I, Utility> {
        self.twu
    }

    /// Items with TWU ≥ `min_util`, by TWU descending. Ties are broken by item
    /// order so the result is deterministic.
    pub fn sorted_items(&self, min_util: Utility) -> Result<Vec<I>> {
        check_threshold(min_util)?;

        let mut retained: Vec<(&I, Utility)> = self
            .twu
            .iter()
            .filter(|&(_, &twu)| twu >= min_util)
            .map(|(item, &twu)| (item, twu))
            .collect();

        retained.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        Ok(retained.into_iter().map(|(item, _)| item.clone()).collect())
    }
}

/// TWU of every item occurring in `transactions`.
pub fn transaction_weighted_utilities<I: Item>(
    transactions: &[Transaction<I>],
    utilities: &UnitUtilities<I>,
) -> Result<HashMap<I, Utility>> {
    let mut accumulator = TwuAccumulator::new();
    accumulator.add_transactions(transactions, utilities)?;
    Ok(accumulator.into_inner())
}

/// Drops items whose TWU is below `min_util` and returns the survivors in
/// descending TWU order. This order drives tree construction.
pub fn prune_and_sort<I: Item>(
    transactions: &[Transaction<I>],
    min_util: Utility,
    utilities: &UnitUtilities<I>,
) -> Result<Vec<I>> {
    check_threshold(min_util)?;
    let mut accumulator = TwuAccumulator::new();
    accumulator.add_transactions(transactions, utilities)?;
    accumulator.sorted_items(min_util)
}
