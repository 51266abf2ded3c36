//! Property-based checks against an exhaustive enumeration of small datasets.

use super::tests::brute_force_huis;
use super::*;
use itertools::Itertools;
use proptest::prelude::*;
use std::collections::BTreeSet;

const NUM_ITEMS: u8 = 8;

fn dataset() -> impl Strategy<Value = (Vec<Transaction<u8>>, UnitUtilities<u8>)> {
    (
        prop::collection::vec(
            prop::collection::vec((0..NUM_ITEMS, 1u32..4), 1..6),
            1..16,
        ),
        prop::collection::vec(1u32..10, NUM_ITEMS as usize),
    )
        .prop_map(|(raw, units)| {
            let transactions = raw
                .into_iter()
                .map(|transaction| {
                    transaction
                        .into_iter()
                        .map(|(item, quantity)| TransactionItem::new(item, f64::from(quantity)))
                        .collect()
                })
                .collect();
            let utilities = units
                .into_iter()
                .enumerate()
                .map(|(item, unit)| (item as u8, f64::from(unit)))
                .collect();
            (transactions, utilities)
        })
}

/// A dataset together with an arbitrary permutation of its transactions.
fn permuted_dataset(
) -> impl Strategy<Value = (Vec<Transaction<u8>>, Vec<Transaction<u8>>, UnitUtilities<u8>)> {
    dataset().prop_flat_map(|(transactions, utilities)| {
        (
            Just(transactions.clone()),
            Just(transactions).prop_shuffle(),
            Just(utilities),
        )
    })
}

fn mine_dataset(
    transactions: &[Transaction<u8>],
    utilities: &UnitUtilities<u8>,
    min_util: Utility,
) -> (UtilityTree<u8>, std::collections::HashSet<Itemset<u8>>) {
    let sorted_items = prune_and_sort(transactions, min_util, utilities).unwrap();
    let tree = build_tree(transactions, &sorted_items, utilities).unwrap();
    let found = mine(&tree, min_util).unwrap();
    (tree, found)
}

proptest! {
    #[test]
    fn prop_mining_matches_brute_force(
        (transactions, utilities) in dataset(),
        min_util in 0u32..120,
    ) {
        let min_util = f64::from(min_util);
        let (_, found) = mine_dataset(&transactions, &utilities, min_util);
        prop_assert_eq!(found, brute_force_huis(&transactions, &utilities, min_util));
    }

    #[test]
    fn prop_twu_bounds_itemset_utility((transactions, utilities) in dataset()) {
        let twu = transaction_weighted_utilities(&transactions, &utilities).unwrap();
        let items: BTreeSet<u8> = twu.keys().copied().collect();

        for subset in items.iter().copied().powerset().filter(|s| !s.is_empty()) {
            let itemset: Itemset<u8> = subset.into_iter().collect();
            let utility = evaluate::itemset_utility(&itemset, &transactions, &utilities).unwrap();
            for item in &itemset {
                prop_assert!(twu[item] >= utility, "TWU({item}) < u({itemset:?})");
            }
        }
    }

    #[test]
    fn prop_chain_counts_match_transactions(
        (transactions, utilities) in dataset(),
        min_util in 0u32..80,
    ) {
        let (tree, _) = mine_dataset(&transactions, &utilities, f64::from(min_util));

        for item in tree.item_order() {
            let chain_count: usize = tree.node_links(item).map(|(_, node)| node.count).sum();
            let containing = transactions
                .iter()
                .filter(|transaction| transaction.iter().any(|entry| &entry.item == item))
                .count();
            prop_assert_eq!(chain_count, containing);
            prop_assert_eq!(tree.item_count(item), containing);
        }
    }

    #[test]
    fn prop_transaction_order_does_not_matter(
        (transactions, permuted, utilities) in permuted_dataset(),
        min_util in 0u32..80,
    ) {
        let min_util = f64::from(min_util);
        let (_, found) = mine_dataset(&transactions, &utilities, min_util);
        let (_, permuted_found) = mine_dataset(&permuted, &utilities, min_util);

        prop_assert_eq!(found, permuted_found);
    }

    #[test]
    fn prop_empty_update_is_a_no_op(
        (transactions, utilities) in dataset(),
        min_util in 0u32..80,
    ) {
        let min_util = f64::from(min_util);
        let (mut tree, found) = mine_dataset(&transactions, &utilities, min_util);
        let nodes = tree.node_count();

        let report = update_tree(&mut tree, &[], &utilities, min_util).unwrap();
        prop_assert_eq!(report.inserted, 0);
        prop_assert_eq!(tree.node_count(), nodes);
        prop_assert_eq!(mine(&tree, min_util).unwrap(), found);
    }
}
