use crate::hui::transaction::{Item, Utility};
use std::collections::HashMap;

/// Index of a node in the tree arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct UtilityNode<I> {
    /// `None` only for the root.
    pub item: Option<I>,
    /// Number of transactions sharing the path down to this node.
    pub count: usize,
    /// Utility of this node's item, summed over those transactions.
    pub utility: Utility,
    /// Utility of each ancestor item (root side first), summed over the same
    /// transactions as `utility`.
    pub prefix_utilities: Vec<Utility>,
    pub parent: Option<NodeId>,
    pub children: HashMap<I, NodeId>,
    /// Next node carrying the same item, in insertion order.
    pub node_link: Option<NodeId>,
}

/// Header table entry: both ends of an item's node-link chain plus the
/// chain totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderEntry {
    pub head: NodeId,
    pub tail: NodeId,
    pub utility: Utility,
    pub count: usize,
}

/// Utility-FP-tree stored as an arena. Parent, child and node-link references
/// are indices into `nodes`; the tree owns every node.
#[derive(Debug, Clone)]
pub struct UtilityTree<I> {
    pub(crate) nodes: Vec<UtilityNode<I>>,
    pub(crate) header_table: HashMap<I, HeaderEntry>,
    pub(crate) root_index: NodeId,
    item_order: Vec<I>,
    ranks: HashMap<I, usize>,
}

impl<I> UtilityNode<I> {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            utility: 0.0,
            prefix_utilities: Vec::new(),
            parent: None,
            children: HashMap::new(),
            node_link: None,
        }
    }

    pub fn new_item(
        item: I,
        utility: Utility,
        prefix_utilities: Vec<Utility>,
        parent: NodeId,
    ) -> Self {
        Self {
            item: Some(item),
            count: 1,
            utility,
            prefix_utilities,
            parent: Some(parent),
            children: HashMap::new(),
            node_link: None,
        }
    }
}

impl<I: Item> UtilityTree<I> {
    /// Empty tree whose paths follow `item_order`. Items outside the order are
    /// never inserted.
    pub fn new(item_order: Vec<I>) -> Self {
        let ranks = item_order
            .iter()
            .enumerate()
            .map(|(rank, item)| (item.clone(), rank))
            .collect();

        Self {
            nodes: vec![UtilityNode::new_root()],
            header_table: HashMap::new(),
            root_index: 0,
            item_order,
            ranks,
        }
    }

    pub fn root(&self) -> &UtilityNode<I> {
        &self.nodes[self.root_index]
    }

    pub fn node(&self, index: NodeId) -> &UtilityNode<I> {
        &self.nodes[index]
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.header_table.is_empty()
    }

    pub fn item_order(&self) -> &[I] {
        &self.item_order
    }

    pub fn rank(&self, item: &I) -> Option<usize> {
        self.ranks.get(item).copied()
    }

    pub fn header(&self, item: &I) -> Option<&HeaderEntry> {
        self.header_table.get(item)
    }

    pub fn contains_item(&self, item: &I) -> bool {
        self.header_table.contains_key(item)
    }

    /// Items that have at least one node, in global order.
    pub fn header_items(&self) -> Vec<I> {
        self.item_order
            .iter()
            .filter(|item| self.header_table.contains_key(*item))
            .cloned()
            .collect()
    }

    /// Exact utility of `item` over all inserted transactions.
    pub fn item_utility(&self, item: &I) -> Utility {
        self.header_table.get(item).map_or(0.0, |entry| entry.utility)
    }

    /// Number of inserted transactions containing `item`.
    pub fn item_count(&self, item: &I) -> usize {
        self.header_table.get(item).map_or(0, |entry| entry.count)
    }
}
