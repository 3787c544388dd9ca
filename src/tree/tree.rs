use crate::data::Matrix;
use crate::grower::Grower;
use crate::node::{Node, Split, SplittableNode};
use crate::splitter::{gather, Splitter};
use hashbrown::HashMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// A binary decision tree, stored as an arena of nodes keyed by node number.
/// The root is node 0, and each internal node owns the two nodes its split
/// points to.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Tree {
    pub nodes: HashMap<usize, Node>,
    pub depth: usize,
    pub n_leaves: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: HashMap::new(),
            depth: 0,
            n_leaves: 0,
        }
    }

    /// Grow the tree on every row of `data`.
    ///
    /// Each region becomes a leaf holding its impurity and leaf value, and is
    /// then split if the depth limit allows it and the splitter finds a split.
    /// Regions are grown depth-first, left child before right child.
    pub fn fit<T: Splitter>(&mut self, data: &Matrix<f64>, y: &[f64], splitter: &T, max_depth: Option<usize>) {
        self.nodes.clear();
        self.depth = 0;
        self.n_leaves = 0;

        let mut n_nodes = 1;
        let mut growable: Vec<SplittableNode> = Vec::new();
        growable.add_node(SplittableNode::new(0, 0, data.index.clone()));

        while let Some(node) = growable.get_next_node() {
            let y_node = gather(y, &node.index);
            let impurity = splitter.impurity(&y_node);
            let value = splitter.leaf_value(&y_node);
            let mut tree_node = Node::leaf(node.num, node.depth, value, impurity, node.index.len());
            self.depth = max(self.depth, node.depth);

            let can_split = max_depth.map_or(true, |d| node.depth < d);
            let split_info = if can_split {
                splitter.best_split(data, y, &node, impurity)
            } else {
                None
            };

            match split_info {
                Some(info) => {
                    let (left_child, right_child) = (n_nodes, n_nodes + 1);
                    n_nodes += 2;
                    trace!(
                        "node {}: split feature {} at {} (gain {}), {} | {} samples",
                        node.num,
                        info.split_feature,
                        info.split_value,
                        info.split_gain,
                        info.left_index.len(),
                        info.right_index.len()
                    );
                    tree_node.make_parent_node(Split {
                        split_feature: info.split_feature,
                        split_value: info.split_value,
                        split_gain: info.split_gain,
                        left_child,
                        right_child,
                    });
                    growable.add_node(SplittableNode::new(right_child, node.depth + 1, info.right_index));
                    growable.add_node(SplittableNode::new(left_child, node.depth + 1, info.left_index));
                }
                None => self.n_leaves += 1,
            }

            self.nodes.insert(node.num, tree_node);
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&0)
    }

    /// Remove a node and everything below it, returning how many nodes were removed.
    pub fn remove_children(&mut self, node_idx: usize) -> usize {
        match self.nodes.remove(&node_idx) {
            None => 0,
            Some(removed_node) => match removed_node.split {
                None => 1,
                Some(split) => 1 + self.remove_children(split.left_child) + self.remove_children(split.right_child),
            },
        }
    }

    /// Recompute the depth and leaf count from the nodes currently in the tree.
    pub fn update_stats(&mut self) {
        self.depth = self.nodes.values().map(|n| n.depth).max().unwrap_or(0);
        self.n_leaves = self.nodes.values().filter(|n| n.is_leaf()).count();
    }

    fn calc_feature_node_stats<F>(&self, calc_stat: &F, node: &Node, stats: &mut HashMap<usize, (f64, usize)>)
    where
        F: Fn(&Node, &Split) -> f64,
    {
        let Some(split) = &node.split else {
            return;
        };
        stats
            .entry(split.split_feature)
            .and_modify(|(v, c)| {
                *v += calc_stat(node, split);
                *c += 1;
            })
            .or_insert((calc_stat(node, split), 1));
        for child in [split.left_child, split.right_child] {
            if let Some(child_node) = self.nodes.get(&child) {
                self.calc_feature_node_stats(calc_stat, child_node, stats);
            }
        }
    }

    fn get_node_stats<F>(&self, calc_stat: &F, stats: &mut HashMap<usize, (f64, usize)>)
    where
        F: Fn(&Node, &Split) -> f64,
    {
        if let Some(root) = self.root() {
            self.calc_feature_node_stats(calc_stat, root, stats);
        }
    }

    pub fn calculate_importance_weight(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.get_node_stats(&|_: &Node, _: &Split| 1., stats);
    }

    pub fn calculate_importance_gain(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.get_node_stats(&|_: &Node, s: &Split| s.split_gain, stats);
    }

    pub fn calculate_importance_cover(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.get_node_stats(&|n: &Node, _: &Split| n.n_samples as f64, stats);
    }

    fn node_text(&self, node_idx: usize, indent: &str) -> String {
        let Some(node) = self.nodes.get(&node_idx) else {
            return String::new();
        };
        match &node.split {
            None => format!("Pred: {:.2}", node.value),
            Some(split) => {
                let child_indent = format!("{}| ", indent);
                format!(
                    "feature_{} <= {:.2}?\n{}T: {}\n{}T: {}",
                    split.split_feature,
                    split.split_value,
                    indent,
                    self.node_text(split.left_child, &child_indent),
                    indent,
                    self.node_text(split.right_child, &child_indent),
                )
            }
        }
    }

    /// Human readable rendering of the tree, root first. Each internal node
    /// is followed by its left then right branch, marked with `T:`.
    pub fn to_text(&self) -> String {
        self.node_text(0, "| ")
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<usize> = vec![0];
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let Some(node) = self.nodes.get(&idx) else {
                continue;
            };
            r += format!("{}{}\n", "      ".repeat(node.depth).as_str(), node).as_str();
            if let Some(split) = &node.split {
                print_buffer.push(split.right_child);
                print_buffer.push(split.left_child);
            }
        }
        write!(f, "{}", r)
    }
}
