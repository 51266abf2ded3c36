//! Error types for high-utility itemset mining.

use super::session::SessionPhase;

pub type Result<T> = std::result::Result<T, HuiError>;

/// Errors raised by the preprocessing, tree and mining operations.
///
/// Every error is detected before any state is mutated, so a failed call leaves
/// the tree or session exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HuiError {
    /// The minimum utility threshold is negative, NaN or infinite.
    #[error("minimum utility must be a non-negative finite number, got {value}")]
    InvalidThreshold { value: f64 },

    /// A transaction carries a negative or non-finite quantity.
    #[error("quantity {quantity} for item {item} in transaction {transaction} must be non-negative and finite")]
    InvalidQuantity {
        item: String,
        quantity: f64,
        transaction: usize,
    },

    /// The unit utility map holds a negative or non-finite value.
    #[error("unit utility {utility} for item {item} must be non-negative and finite")]
    InvalidUnitUtility { item: String, utility: f64 },

    /// An item referenced by a transaction has no unit utility.
    #[error("item {item} in transaction {transaction} has no unit utility")]
    MissingUtility { item: String, transaction: usize },

    /// A session operation was issued in the wrong phase.
    #[error("cannot {operation} in phase {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: SessionPhase,
    },
}

pub(crate) fn check_threshold(min_util: f64) -> Result<()> {
    if !min_util.is_finite() || min_util < 0.0 {
        return Err(HuiError::InvalidThreshold { value: min_util });
    }
    Ok(())
}
