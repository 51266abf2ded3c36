pub mod budget;
pub mod builder;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod mining;
pub mod preprocess;
pub mod projection;
pub mod session;
pub mod transaction;
pub mod tree;
pub mod updater;

#[cfg(test)]
mod proptests;

pub use budget::SearchBudget;
pub use builder::build_tree;
pub use config::MiningConfig;
pub use error::{HuiError, Result};
pub use mining::{mine, HighUtilityItemset, HuiMiner, MiningResult};
pub use preprocess::{prune_and_sort, transaction_weighted_utilities, TwuAccumulator};
pub use session::{HuiSession, SessionPhase, SessionStats};
pub use transaction::{Item, Itemset, Transaction, TransactionItem, UnitUtilities, Utility};
pub use tree::{HeaderEntry, NodeId, UtilityNode, UtilityTree};
pub use updater::{update_tree, NewHighUtilityItem, UpdateReport};
