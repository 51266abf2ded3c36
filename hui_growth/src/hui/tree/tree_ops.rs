use super::tree::{HeaderEntry, NodeId, UtilityNode, UtilityTree};
use crate::hui::transaction::{Item, Utility};

/// Walks an item's node-link chain from the header table.
pub struct NodeLinks<'a, I> {
    tree: &'a UtilityTree<I>,
    next: Option<NodeId>,
}

impl<'a, I> Iterator for NodeLinks<'a, I> {
    type Item = (NodeId, &'a UtilityNode<I>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = &self.tree.nodes[index];
        self.next = node.node_link;
        Some((index, node))
    }
}

impl<I: Item> UtilityTree<I> {
    /// Inserts one transaction. `path` holds the transaction's retained items
    /// in global order, each with its utility in that transaction.
    ///
    /// Shared prefixes merge into existing nodes (count + 1, utilities added)
    /// and the walk always descends into the merged child.
    pub(crate) fn insert_path(&mut self, path: &[(I, Utility)]) {
        let mut current_index = self.root_index;

        for (depth, (item, utility)) in path.iter().enumerate() {
            if let Some(&child_index) = self.nodes[current_index].children.get(item) {
                let child = &mut self.nodes[child_index];
                child.count += 1;
                child.utility += utility;
                for (acc, (_, prefix_utility)) in
                    child.prefix_utilities.iter_mut().zip(&path[..depth])
                {
                    *acc += prefix_utility;
                }
                current_index = child_index;
            } else {
                let new_index = self.nodes.len();
                let prefix_utilities = path[..depth].iter().map(|(_, u)| *u).collect();
                self.nodes.push(UtilityNode::new_item(
                    item.clone(),
                    *utility,
                    prefix_utilities,
                    current_index,
                ));
                self.nodes[current_index]
                    .children
                    .insert(item.clone(), new_index);
                self.link_node(item, new_index);
                current_index = new_index;
            }

            if let Some(entry) = self.header_table.get_mut(item) {
                entry.utility += utility;
                entry.count += 1;
            }
        }
    }

    /// Appends a new node to its item's chain through the tracked tail.
    fn link_node(&mut self, item: &I, index: NodeId) {
        match self.header_table.get_mut(item) {
            Some(entry) => {
                self.nodes[entry.tail].node_link = Some(index);
                entry.tail = index;
            }
            None => {
                self.header_table.insert(
                    item.clone(),
                    HeaderEntry {
                        head: index,
                        tail: index,
                        utility: 0.0,
                        count: 0,
                    },
                );
            }
        }
    }

    pub fn node_links(&self, item: &I) -> NodeLinks<'_, I> {
        NodeLinks {
            tree: self,
            next: self.header_table.get(item).map(|entry| entry.head),
        }
    }

    /// Items on the path from the root down to `index`'s parent, root side
    /// first. Lines up with the node's `prefix_utilities`.
    pub fn prefix_path(&self, index: NodeId) -> Vec<I> {
        let mut path = Vec::new();
        let mut current = self.nodes[index].parent;

        while let Some(i) = current {
            if let Some(item) = &self.nodes[i].item {
                path.push(item.clone());
            }
            current = self.nodes[i].parent;
        }

        path.reverse();
        path
    }

    /// Checks the arena invariants. Only active in debug builds.
    pub(crate) fn debug_check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let mut seen = vec![false; self.nodes.len()];
        for (item, entry) in &self.header_table {
            let mut count = 0;
            let mut last: Option<NodeId> = None;
            for (index, node) in self.node_links(item) {
                debug_assert!(!seen[index], "node-link chain revisits node {index}");
                if seen[index] {
                    break;
                }
                debug_assert!(
                    last.map_or(true, |prev| prev < index),
                    "node-link chain out of insertion order at node {index}"
                );
                debug_assert_eq!(node.item.as_ref(), Some(item));
                seen[index] = true;
                count += node.count;
                last = Some(index);
            }
            debug_assert_eq!(last, Some(entry.tail), "stale chain tail for {item:?}");
            debug_assert_eq!(count, entry.count, "chain count mismatch for {item:?}");
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if index == self.root_index {
                debug_assert!(node.parent.is_none() && node.item.is_none());
                continue;
            }
            debug_assert!(seen[index], "node {index} is not on its node-link chain");

            let Some(parent_index) = node.parent else {
                debug_assert!(false, "orphaned node {index}");
                continue;
            };
            debug_assert!(parent_index < index, "parent of {index} created after it");

            let parent = &self.nodes[parent_index];
            let expected_depth = if parent_index == self.root_index {
                0
            } else {
                parent.prefix_utilities.len() + 1
            };
            debug_assert_eq!(node.prefix_utilities.len(), expected_depth);
            debug_assert!(node
                .item
                .as_ref()
                .is_some_and(|item| parent.children.get(item) == Some(&index)));
        }
    }
}
