//! Exact itemset measures computed by scanning raw transactions.

use super::error::Result;
use super::transaction::{item_utilities, Item, Itemset, Transaction, UnitUtilities, Utility};

/// Utility of `itemset`: over every transaction containing all of its items,
/// the sum of those items' quantity × unit utility.
pub fn itemset_utility<I: Item>(
    itemset: &Itemset<I>,
    transactions: &[Transaction<I>],
    utilities: &UnitUtilities<I>,
) -> Result<Utility> {
    let mut total = 0.0;
    for (index, transaction) in transactions.iter().enumerate() {
        let resolved = item_utilities(index, transaction, utilities)?;
        let matched: Vec<Utility> = resolved
            .iter()
            .filter(|(item, _)| itemset.contains(item))
            .map(|(_, utility)| *utility)
            .collect();
        if !itemset.is_empty() && matched.len() == itemset.len() {
            total += matched.iter().sum::<Utility>();
        }
    }
    Ok(total)
}

/// Number of transactions containing every item of `itemset`.
pub fn itemset_support<I: Item>(itemset: &Itemset<I>, transactions: &[Transaction<I>]) -> usize {
    transactions
        .iter()
        .filter(|transaction| {
            itemset
                .iter()
                .all(|item| transaction.iter().any(|entry| &entry.item == item))
        })
        .count()
}
