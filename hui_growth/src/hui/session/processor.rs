use super::state::{HuiSession, SessionPhase};
use crate::hui::builder::insert_resolved;
use crate::hui::config::MiningConfig;
use crate::hui::error::{HuiError, Result};
use crate::hui::mining::{HuiMiner, MiningResult};
use crate::hui::transaction::{resolve_batch, Item, Transaction};
use crate::hui::tree::UtilityTree;
use crate::hui::updater::{update_tree, UpdateReport};
use tracing::debug;

impl<I: Item> HuiSession<I> {
    fn expect_phase(&self, expected: SessionPhase, operation: &'static str) -> Result<()> {
        if self.phase != expected {
            return Err(HuiError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// First pass: accumulate TWU for a chunk.
    pub fn count_pass(&mut self, transactions: &[Transaction<I>]) -> Result<()> {
        self.expect_phase(SessionPhase::Counting, "count")?;
        self.twu.add_transactions(transactions, &self.utilities)
    }

    /// Fixes the threshold and the global item order, and starts the build pass.
    pub fn finalize_counts(&mut self, min_util: f64) -> Result<&[I]> {
        self.expect_phase(SessionPhase::Counting, "finalize counts")?;

        self.sorted_items = self.twu.sorted_items(min_util)?;
        self.min_util = Some(min_util);
        self.tree = Some(UtilityTree::new(self.sorted_items.clone()));
        self.phase = SessionPhase::Building;

        debug!(
            transactions = self.twu.num_transactions(),
            distinct = self.twu.distinct_items(),
            retained = self.sorted_items.len(),
            "counting finished"
        );
        Ok(&self.sorted_items)
    }

    /// Second pass: insert a chunk into the tree.
    pub fn build_pass(&mut self, transactions: &[Transaction<I>]) -> Result<()> {
        self.expect_phase(SessionPhase::Building, "build")?;

        let resolved = resolve_batch(transactions, &self.utilities)?;
        let tree = self
            .tree
            .as_mut()
            .ok_or(HuiError::InvalidPhase {
                operation: "build",
                phase: self.phase,
            })?;
        self.transactions_inserted += insert_resolved(tree, resolved, |_| true);
        Ok(())
    }

    pub fn finalize_building(&mut self) -> Result<()> {
        self.expect_phase(SessionPhase::Building, "finalize building")?;
        if let Some(tree) = &self.tree {
            tree.debug_check_invariants();
        }
        self.phase = SessionPhase::ReadyToMine;
        Ok(())
    }

    /// Mines with the session threshold and no search limits.
    pub fn mine(&self) -> Result<MiningResult<I>> {
        self.mine_with(MiningConfig::default())
    }

    /// Mines with the limits of `config`. The threshold is always the one
    /// fixed by [`finalize_counts`](Self::finalize_counts); mining below it
    /// would miss itemsets made of pruned items.
    pub fn mine_with(&self, config: MiningConfig) -> Result<MiningResult<I>> {
        let (tree, min_util) = self.ready("mine")?;
        HuiMiner::new(MiningConfig { min_util, ..config }).mine(tree)
    }

    /// Applies an incremental batch to the built tree.
    pub fn update(&mut self, transactions: &[Transaction<I>]) -> Result<UpdateReport<I>> {
        let (_, min_util) = self.ready("update")?;
        let tree = self.tree.as_mut().ok_or(HuiError::InvalidPhase {
            operation: "update",
            phase: self.phase,
        })?;

        let report = update_tree(tree, transactions, &self.utilities, min_util)?;
        self.transactions_updated += report.inserted;
        Ok(report)
    }

    fn ready(&self, operation: &'static str) -> Result<(&UtilityTree<I>, f64)> {
        self.expect_phase(SessionPhase::ReadyToMine, operation)?;
        match (&self.tree, self.min_util) {
            (Some(tree), Some(min_util)) => Ok((tree, min_util)),
            _ => Err(HuiError::InvalidPhase {
                operation,
                phase: self.phase,
            }),
        }
    }
}
