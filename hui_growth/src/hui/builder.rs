use super::error::Result;
use super::transaction::{resolve_batch, Item, Transaction, UnitUtilities, Utility};
use super::tree::UtilityTree;
use tracing::debug;

/// Builds the utility-FP-tree for `transactions`.
///
/// Each transaction is restricted to `sorted_items` and reordered by that
/// global order before insertion, so identical item prefixes share one path.
/// The whole input is validated first; on error nothing is built.
pub fn build_tree<I: Item>(
    transactions: &[Transaction<I>],
    sorted_items: &[I],
    utilities: &UnitUtilities<I>,
) -> Result<UtilityTree<I>> {
    let resolved = resolve_batch(transactions, utilities)?;

    let mut tree = UtilityTree::new(sorted_items.to_vec());
    insert_resolved(&mut tree, resolved, |_| true);
    tree.debug_check_invariants();

    debug!(
        transactions = transactions.len(),
        nodes = tree.node_count(),
        header_items = tree.header_table.len(),
        "built utility tree"
    );
    Ok(tree)
}

/// Inserts already validated transactions, keeping only items that are part
/// of the tree's order and accepted by `keep`.
pub(crate) fn insert_resolved<I, F>(
    tree: &mut UtilityTree<I>,
    resolved: Vec<Vec<(I, Utility)>>,
    keep: F,
) -> usize
where
    I: Item,
    F: Fn(&I) -> bool,
{
    let mut inserted = 0;
    for transaction in resolved {
        let path = ordered_path(tree, transaction, &keep);
        if path.is_empty() {
            continue;
        }
        tree.insert_path(&path);
        inserted += 1;
    }
    inserted
}

fn ordered_path<I, F>(
    tree: &UtilityTree<I>,
    transaction: Vec<(I, Utility)>,
    keep: &F,
) -> Vec<(I, Utility)>
where
    I: Item,
    F: Fn(&I) -> bool,
{
    let mut ranked: Vec<(usize, I, Utility)> = transaction
        .into_iter()
        .filter(|(item, _)| keep(item))
        .filter_map(|(item, utility)| tree.rank(&item).map(|rank| (rank, item, utility)))
        .collect();

    ranked.sort_unstable_by_key(|&(rank, _, _)| rank);
    ranked
        .into_iter()
        .map(|(_, item, utility)| (item, utility))
        .collect()
}
