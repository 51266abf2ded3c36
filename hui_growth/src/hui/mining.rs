//! Recursive pseudo-projection search for high-utility itemsets.

use super::budget::SearchBudget;
use super::config::MiningConfig;
use super::error::{check_threshold, Result};
use super::projection::{
    extend, local_header, potential_utility, project_item, support, total_utility,
    LocalHeaderEntry, ProjectedEntry,
};
use super::transaction::{Item, Itemset, Utility};
use super::tree::UtilityTree;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A mined itemset with its exact utility and the number of transactions
/// containing it.
#[derive(Debug, Clone, PartialEq)]
pub struct HighUtilityItemset<I> {
    pub items: Itemset<I>,
    pub utility: Utility,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiningResult<I> {
    /// By utility descending, then by items.
    pub itemsets: Vec<HighUtilityItemset<I>>,
    /// Set when a configured limit or a cancellation cut off a branch that
    /// could still hold high-utility itemsets.
    pub truncated: bool,
}

impl<I: Item> MiningResult<I> {
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn get(&self, items: &Itemset<I>) -> Option<&HighUtilityItemset<I>> {
        self.itemsets.iter().find(|found| &found.items == items)
    }

    pub fn itemset_set(&self) -> HashSet<Itemset<I>> {
        self.itemsets.iter().map(|found| found.items.clone()).collect()
    }
}

/// Mines every itemset whose utility reaches `min_util`, with no limits.
pub fn mine<I: Item>(tree: &UtilityTree<I>, min_util: Utility) -> Result<HashSet<Itemset<I>>> {
    let result = HuiMiner::new(MiningConfig::new(min_util)).mine(tree)?;
    Ok(result.itemset_set())
}

#[derive(Debug, Clone, Default)]
pub struct HuiMiner {
    config: MiningConfig,
}

impl HuiMiner {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    pub fn mine<I: Item>(&self, tree: &UtilityTree<I>) -> Result<MiningResult<I>> {
        let budget = SearchBudget::from_limit(self.config.max_expansions);
        self.mine_with_budget(tree, &budget)
    }

    /// Mines with a caller-owned budget, which may be cancelled from another
    /// thread while the search runs.
    pub fn mine_with_budget<I: Item>(
        &self,
        tree: &UtilityTree<I>,
        budget: &SearchBudget,
    ) -> Result<MiningResult<I>> {
        check_threshold(self.config.min_util)?;

        // Cheapest items first. Only the schedule depends on this order.
        let mut items = tree.header_items();
        items.sort_by(|a, b| tree.item_utility(a).total_cmp(&tree.item_utility(b)));

        let searches: Vec<Search<'_, I>> = if self.config.parallel {
            items
                .par_iter()
                .map(|item| self.mine_item(tree, item, budget))
                .collect()
        } else {
            items
                .iter()
                .map(|item| self.mine_item(tree, item, budget))
                .collect()
        };

        let mut truncated = false;
        let mut itemsets = Vec::new();
        for search in searches {
            truncated |= search.truncated;
            itemsets.extend(search.found);
        }
        itemsets.sort_by(|a, b| {
            b.utility
                .total_cmp(&a.utility)
                .then_with(|| a.items.cmp(&b.items))
        });

        if truncated {
            warn!(
                found = itemsets.len(),
                expansions = budget.used(),
                "search stopped early; result may be incomplete"
            );
        }
        info!(
            found = itemsets.len(),
            truncated,
            min_util = self.config.min_util,
            "mined high-utility itemsets"
        );

        Ok(MiningResult {
            itemsets,
            truncated,
        })
    }

    fn mine_item<'a, I: Item>(
        &'a self,
        tree: &UtilityTree<I>,
        item: &I,
        budget: &'a SearchBudget,
    ) -> Search<'a, I> {
        let mut search = Search {
            config: &self.config,
            budget,
            found: Vec::new(),
            explored: HashSet::new(),
            truncated: false,
        };

        let projected = project_item(tree, item);
        if projected.is_empty() {
            return search;
        }

        // total <= potential, so a pruned branch holds nothing to emit
        let potential = potential_utility(&projected);
        if potential < self.config.min_util {
            debug!(item = ?item, potential, "pruned top-level branch");
            return search;
        }

        // Only a promising branch counts as cut off.
        if self.config.max_itemset_len == Some(0) || !budget.try_expand() {
            search.truncated = true;
            return search;
        }

        let itemset = Itemset::from([item.clone()]);
        let total = total_utility(&projected);
        if total >= self.config.min_util {
            search.emit(&itemset, total, &projected);
        }
        search.mine_conditional(&itemset, &projected);

        search
    }
}

/// State of one top-level search. Independent of every other top-level
/// search; only the budget is shared.
struct Search<'a, I> {
    config: &'a MiningConfig,
    budget: &'a SearchBudget,
    found: Vec<HighUtilityItemset<I>>,
    explored: HashSet<Itemset<I>>,
    truncated: bool,
}

impl<I: Item> Search<'_, I> {
    fn emit(&mut self, itemset: &Itemset<I>, utility: Utility, projected: &[ProjectedEntry<I>]) {
        self.found.push(HighUtilityItemset {
            items: itemset.clone(),
            utility,
            count: support(projected),
        });
    }

    fn mine_conditional(&mut self, prefix: &Itemset<I>, projected: &[ProjectedEntry<I>]) {
        let min_util = self.config.min_util;
        let header = local_header(projected);
        if header.is_empty() {
            return;
        }

        if self
            .config
            .max_itemset_len
            .is_some_and(|max_len| prefix.len() >= max_len)
        {
            if header
                .values()
                .any(|local| local.potential_utility_if_chosen >= min_util)
            {
                self.truncated = true;
            }
            return;
        }

        let mut candidates: Vec<(I, LocalHeaderEntry)> = header.into_iter().collect();
        candidates.sort_by(|a, b| {
            b.1.potential_utility_if_chosen
                .total_cmp(&a.1.potential_utility_if_chosen)
                .then_with(|| a.0.cmp(&b.0))
        });

        for (item, local) in candidates {
            // Sorted by potential, so nothing after this can qualify either.
            if local.potential_utility_if_chosen < min_util {
                break;
            }

            let mut itemset = prefix.clone();
            itemset.insert(item.clone());
            if self.explored.contains(&itemset) {
                continue;
            }
            if !self.budget.try_expand() {
                self.truncated = true;
                return;
            }
            self.explored.insert(itemset.clone());

            let next = extend(projected, &item);
            if next.is_empty() {
                continue;
            }

            let total = total_utility(&next);
            if total >= min_util {
                self.emit(&itemset, total, &next);
            }

            if potential_utility(&next) >= min_util {
                self.mine_conditional(&itemset, &next);
            }
        }
    }
}
