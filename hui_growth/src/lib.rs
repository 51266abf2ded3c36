//! High-utility itemset mining over a utility-FP-tree.
//!
//! Items are pruned by transaction-weighted utility ([`prune_and_sort`]),
//! transactions are compressed into an arena tree ([`build_tree`]), and the
//! tree is searched by recursive pseudo-projection ([`HuiMiner`]). New batches
//! can be folded into a built tree with [`update_tree`].

pub mod hui;

#[cfg(feature = "python")]
mod python;

pub use hui::{
    build_tree, mine, prune_and_sort, update_tree, HighUtilityItemset, HuiError, HuiMiner,
    HuiSession, Itemset, MiningConfig, MiningResult, Transaction, TransactionItem,
    UnitUtilities, UpdateReport, Utility, UtilityTree,
};
