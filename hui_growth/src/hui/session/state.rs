use crate::hui::preprocess::TwuAccumulator;
use crate::hui::transaction::{Item, UnitUtilities, Utility};
use crate::hui::tree::UtilityTree;

/// Chunked two-pass mining session: count TWU over every chunk, fix the item
/// order, insert every chunk, then mine and apply incremental batches.
#[derive(Debug)]
pub struct HuiSession<I> {
    pub(super) utilities: UnitUtilities<I>,
    pub(super) twu: TwuAccumulator<I>,
    pub(super) min_util: Option<Utility>,
    pub(super) sorted_items: Vec<I>,
    pub(super) tree: Option<UtilityTree<I>>,
    pub(super) transactions_inserted: usize,
    pub(super) transactions_updated: usize,
    pub(super) phase: SessionPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Counting,
    Building,
    ReadyToMine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub transactions_counted: usize,
    pub transactions_inserted: usize,
    pub transactions_updated: usize,
    pub distinct_items: usize,
    pub retained_items: usize,
    pub tree_nodes: usize,
}

impl<I: Item> HuiSession<I> {
    pub fn new(utilities: UnitUtilities<I>) -> Self {
        Self {
            utilities,
            twu: TwuAccumulator::new(),
            min_util: None,
            sorted_items: Vec::new(),
            tree: None,
            transactions_inserted: 0,
            transactions_updated: 0,
            phase: SessionPhase::Counting,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn min_util(&self) -> Option<Utility> {
        self.min_util
    }

    /// Retained items by TWU descending; empty until counts are finalized.
    pub fn sorted_items(&self) -> &[I] {
        &self.sorted_items
    }

    pub fn tree(&self) -> Option<&UtilityTree<I>> {
        self.tree.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            transactions_counted: self.twu.num_transactions(),
            transactions_inserted: self.transactions_inserted,
            transactions_updated: self.transactions_updated,
            distinct_items: self.twu.distinct_items(),
            retained_items: self.sorted_items.len(),
            tree_nodes: self.tree.as_ref().map_or(0, |tree| tree.node_count()),
        }
    }
}
