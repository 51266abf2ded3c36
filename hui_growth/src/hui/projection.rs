//! Projected databases: the per-itemset summaries the miner recurses over.

use super::transaction::{Item, Utility};
use super::tree::UtilityTree;
use std::collections::HashMap;

/// One tree path as seen from an itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedEntry<I> {
    /// Path items not yet in the itemset, each with its utility over the
    /// transactions collapsed onto this path.
    pub prefix: Vec<(I, Utility)>,
    /// Utility of the itemset over those transactions.
    pub utility: Utility,
    /// Number of transactions collapsed onto this path.
    pub count: usize,
}

pub type ProjectedDatabase<I> = Vec<ProjectedEntry<I>>;

impl<I: Item> ProjectedEntry<I> {
    pub fn prefix_utility(&self, item: &I) -> Option<Utility> {
        self.prefix
            .iter()
            .find(|(candidate, _)| candidate == item)
            .map(|(_, utility)| *utility)
    }

    /// Utility still obtainable from the prefix items.
    pub fn remaining_utility(&self) -> Utility {
        self.prefix.iter().map(|(_, utility)| utility).sum()
    }
}

/// Candidate summary for extending a prefix by one item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalHeaderEntry {
    /// Utility of `prefix ∪ {j}`.
    pub total_utility_as_next: Utility,
    /// Upper bound on `prefix ∪ {j}` and every extension of it.
    pub potential_utility_if_chosen: Utility,
    pub count_in_paths: usize,
}

/// Projected database of the single item `item`, one entry per node on its
/// node-link chain.
pub fn project_item<I: Item>(tree: &UtilityTree<I>, item: &I) -> ProjectedDatabase<I> {
    tree.node_links(item)
        .map(|(index, node)| ProjectedEntry {
            prefix: tree
                .prefix_path(index)
                .into_iter()
                .zip(node.prefix_utilities.iter().copied())
                .collect(),
            utility: node.utility,
            count: node.count,
        })
        .collect()
}

/// Projected database of `prefix ∪ {item}` given the database of `prefix`.
/// Entries whose path lacks `item` are dropped.
pub fn extend<I: Item>(projected: &[ProjectedEntry<I>], item: &I) -> ProjectedDatabase<I> {
    projected
        .iter()
        .filter_map(|entry| {
            let added = entry.prefix_utility(item)?;
            Some(ProjectedEntry {
                prefix: entry
                    .prefix
                    .iter()
                    .filter(|(candidate, _)| candidate != item)
                    .cloned()
                    .collect(),
                utility: entry.utility + added,
                count: entry.count,
            })
        })
        .collect()
}

pub fn total_utility<I>(projected: &[ProjectedEntry<I>]) -> Utility {
    projected.iter().map(|entry| entry.utility).sum()
}

/// Admissible upper bound on the utility of the itemset and any extension of
/// it by prefix items.
pub fn potential_utility<I: Item>(projected: &[ProjectedEntry<I>]) -> Utility {
    projected
        .iter()
        .map(|entry| entry.utility + entry.remaining_utility())
        .sum()
}

/// Number of transactions containing the itemset.
pub fn support<I>(projected: &[ProjectedEntry<I>]) -> usize {
    projected.iter().map(|entry| entry.count).sum()
}

/// Summarises every distinct prefix item as a candidate extension.
pub fn local_header<I: Item>(projected: &[ProjectedEntry<I>]) -> HashMap<I, LocalHeaderEntry> {
    let mut header: HashMap<I, LocalHeaderEntry> = HashMap::new();

    for entry in projected {
        let path_potential = entry.utility + entry.remaining_utility();
        for (item, utility) in &entry.prefix {
            let local = header.entry(item.clone()).or_default();
            local.total_utility_as_next += entry.utility + utility;
            local.potential_utility_if_chosen += path_potential;
            local.count_in_paths += entry.count;
        }
    }

    header
}
