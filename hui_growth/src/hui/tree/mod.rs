// Tree module - utility-FP-tree arena and its operations

mod tree;
mod tree_ops;

pub use tree::{HeaderEntry, NodeId, UtilityNode, UtilityTree};
pub use tree_ops::NodeLinks;
