//! Pruning
//!
//! Post-hoc simplification of a grown tree.
use crate::tree::tree::Tree;
use log::debug;

impl Tree {
    /// Collapse every internal node whose two children are leaves and whose
    /// split decreases impurity by less than `alpha`, where the decrease is
    /// `impurity(node) - p * impurity(left) - (1 - p) * impurity(right)` and `p`
    /// is the share of the node's samples that went left.
    ///
    /// Nodes are visited children first, so a node whose children were just
    /// collapsed is considered with them as leaves. Collapsed nodes keep the leaf
    /// value they were grown with. Returns the number of collapsed nodes.
    pub fn prune(&mut self, alpha: f64) -> usize {
        let old_length = self.nodes.len();
        let mut collapsed = 0;

        for node_idx in self.post_order() {
            let prunable = matches!(self.collapse_gain(node_idx), Some(delta) if delta < alpha);
            if !prunable {
                continue;
            }
            let split = self.nodes.get_mut(&node_idx).and_then(|n| n.make_leaf());
            if let Some(split) = split {
                self.remove_children(split.left_child);
                self.remove_children(split.right_child);
                collapsed += 1;
            }
        }

        self.update_stats();
        debug!(
            "pruning: n_nodes: {} -> {}, n_leaves: {}",
            old_length,
            self.nodes.len(),
            self.n_leaves
        );
        collapsed
    }

    /// Impurity decrease of a node's split, or `None` unless the node is
    /// internal with two leaf children.
    fn collapse_gain(&self, node_idx: usize) -> Option<f64> {
        let node = self.nodes.get(&node_idx)?;
        let split = node.split.as_ref()?;
        let left = self.nodes.get(&split.left_child)?;
        let right = self.nodes.get(&split.right_child)?;
        if !left.is_leaf() || !right.is_leaf() {
            return None;
        }
        let p = left.n_samples as f64 / (left.n_samples + right.n_samples) as f64;
        Some(node.impurity - p * left.impurity - (1.0 - p) * right.impurity)
    }

    /// Node numbers ordered so that every node comes after all of its descendants.
    fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut unchecked_nodes = vec![0];
        while let Some(node_idx) = unchecked_nodes.pop() {
            let Some(node) = self.nodes.get(&node_idx) else {
                continue;
            };
            order.push(node_idx);
            if let Some(split) = &node.split {
                unchecked_nodes.push(split.right_child);
                unchecked_nodes.push(split.left_child);
            }
        }
        order.reverse();
        order
    }
}
