use super::error::{HuiError, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as an item label.
pub trait Item: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> Item for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

pub type Utility = f64;

/// Unit value of every item, supplied by the caller.
pub type UnitUtilities<I> = HashMap<I, Utility>;

/// An itemset as returned by the miner.
pub type Itemset<I> = BTreeSet<I>;

/// One purchased item in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionItem<I> {
    pub item: I,
    pub quantity: f64,
}

pub type Transaction<I> = Vec<TransactionItem<I>>;

impl<I> TransactionItem<I> {
    pub fn new(item: I, quantity: f64) -> Self {
        Self { item, quantity }
    }
}

impl<I> From<(I, f64)> for TransactionItem<I> {
    fn from((item, quantity): (I, f64)) -> Self {
        Self { item, quantity }
    }
}

/// Resolves the utility (quantity × unit utility) of each distinct item of a
/// transaction, in first-occurrence order. Repeated items have their
/// utilities summed.
pub(crate) fn item_utilities<I: Item>(
    index: usize,
    transaction: &[TransactionItem<I>],
    utilities: &UnitUtilities<I>,
) -> Result<Vec<(I, Utility)>> {
    let mut resolved: Vec<(I, Utility)> = Vec::with_capacity(transaction.len());
    let mut positions: HashMap<&I, usize> = HashMap::with_capacity(transaction.len());

    for entry in transaction {
        if !entry.quantity.is_finite() || entry.quantity < 0.0 {
            return Err(HuiError::InvalidQuantity {
                item: format!("{:?}", entry.item),
                quantity: entry.quantity,
                transaction: index,
            });
        }
        let unit = unit_utility(index, &entry.item, utilities)?;
        let utility = entry.quantity * unit;

        match positions.get(&entry.item) {
            Some(&pos) => resolved[pos].1 += utility,
            None => {
                positions.insert(&entry.item, resolved.len());
                resolved.push((entry.item.clone(), utility));
            }
        }
    }

    Ok(resolved)
}

fn unit_utility<I: Item>(index: usize, item: &I, utilities: &UnitUtilities<I>) -> Result<Utility> {
    let unit = *utilities.get(item).ok_or_else(|| HuiError::MissingUtility {
        item: format!("{item:?}"),
        transaction: index,
    })?;

    if !unit.is_finite() || unit < 0.0 {
        return Err(HuiError::InvalidUnitUtility {
            item: format!("{item:?}"),
            utility: unit,
        });
    }
    Ok(unit)
}

/// Validates a whole batch up front and resolves every transaction.
pub(crate) fn resolve_batch<I: Item>(
    transactions: &[Transaction<I>],
    utilities: &UnitUtilities<I>,
) -> Result<Vec<Vec<(I, Utility)>>> {
    transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| item_utilities(index, transaction, utilities))
        .collect()
}
