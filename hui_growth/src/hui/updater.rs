//! Incremental insertion of new transaction batches into an existing tree.

use super::builder::insert_resolved;
use super::error::{check_threshold, Result};
use super::preprocess::TwuAccumulator;
use super::transaction::{resolve_batch, Item, Transaction, UnitUtilities, Utility};
use super::tree::UtilityTree;
use std::collections::HashSet;
use tracing::{debug, warn};

/// An item absent from the tree whose TWU over the new batch alone reaches
/// the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHighUtilityItem<I> {
    pub item: I,
    pub twu: Utility,
}

/// Outcome of [`update_tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport<I> {
    /// Transactions that added or merged a path.
    pub inserted: usize,
    /// Transactions with no item already in the tree.
    pub skipped: usize,
    /// Advisory signal, by TWU descending. The tree is not extended with these
    /// items; mining results stay incomplete for them until a full rebuild.
    pub new_high_utility_items: Vec<NewHighUtilityItem<I>>,
}

impl<I> UpdateReport<I> {
    pub fn requires_rebuild(&self) -> bool {
        !self.new_high_utility_items.is_empty()
    }
}

/// Inserts `new_transactions` into `tree` without rebuilding it.
///
/// Only items already in the header table are inserted, following the order
/// the tree was built with. Items new to the tree are never added; those whose
/// TWU over this batch reaches `min_util` are reported instead. The batch is
/// validated before the tree is touched.
pub fn update_tree<I: Item>(
    tree: &mut UtilityTree<I>,
    new_transactions: &[Transaction<I>],
    utilities: &UnitUtilities<I>,
    min_util: Utility,
) -> Result<UpdateReport<I>> {
    check_threshold(min_util)?;
    let resolved = resolve_batch(new_transactions, utilities)?;

    let mut batch_twu = TwuAccumulator::new();
    batch_twu.add_resolved(&resolved);

    let known: HashSet<I> = tree.header_table.keys().cloned().collect();
    let inserted = insert_resolved(tree, resolved, |item| known.contains(item));
    tree.debug_check_invariants();

    let mut new_high_utility_items: Vec<NewHighUtilityItem<I>> = batch_twu
        .into_inner()
        .into_iter()
        .filter(|(item, twu)| !known.contains(item) && *twu >= min_util)
        .map(|(item, twu)| NewHighUtilityItem { item, twu })
        .collect();
    new_high_utility_items
        .sort_unstable_by(|a, b| b.twu.total_cmp(&a.twu).then_with(|| a.item.cmp(&b.item)));

    for candidate in &new_high_utility_items {
        warn!(
            item = ?candidate.item,
            twu = candidate.twu,
            min_util,
            "item outside the tree became high-utility; a full rebuild is needed to mine it"
        );
    }

    debug!(
        batch = new_transactions.len(),
        inserted,
        nodes = tree.node_count(),
        "incremental update finished"
    );

    Ok(UpdateReport {
        inserted,
        skipped: new_transactions.len() - inserted,
        new_high_utility_items,
    })
}
