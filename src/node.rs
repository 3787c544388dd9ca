use serde::{Deserialize, Serialize};
use std::fmt;

/// A region of the training data that is still waiting to be turned
/// into a node of the tree.
#[derive(Debug)]
pub struct SplittableNode {
    pub num: usize,
    pub depth: usize,
    /// Rows of the training data that fall in this region, in input order.
    pub index: Vec<usize>,
}

impl SplittableNode {
    pub fn new(num: usize, depth: usize, index: Vec<usize>) -> Self {
        SplittableNode { num, depth, index }
    }
}

/// Split information held by an internal node.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Split {
    pub split_feature: usize,
    pub split_value: f64,
    /// Weighted impurity reduction the split achieved when the tree was grown.
    pub split_gain: f64,
    pub left_child: usize,
    pub right_child: usize,
}

impl Split {
    /// Get the path that should be traveled down, given a value.
    /// Values at or below the threshold go left.
    pub fn get_child_idx(&self, v: f64) -> usize {
        if v <= self.split_value {
            self.left_child
        } else {
            self.right_child
        }
    }
}

/// A node of a fitted tree.
///
/// A node with no `split` is a leaf. Every node carries the impurity and the
/// sample count of its region, whether or not it is a leaf, as the pruner needs
/// both after growth.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Node {
    pub num: usize,
    pub depth: usize,
    pub value: f64,
    pub impurity: f64,
    pub n_samples: usize,
    pub split: Option<Split>,
}

impl Node {
    /// Create a leaf node.
    pub fn leaf(num: usize, depth: usize, value: f64, impurity: f64, n_samples: usize) -> Self {
        Node {
            num,
            depth,
            value,
            impurity,
            n_samples,
            split: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    /// Turn this node into an internal node.
    pub fn make_parent_node(&mut self, split: Split) {
        self.split = Some(split);
    }

    /// Demote this node back to a leaf, returning the split it held.
    /// The leaf value set when the node was grown is kept as is.
    pub fn make_leaf(&mut self) -> Option<Split> {
        self.split.take()
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.split {
            None => write!(
                f,
                "{}:leaf={},impurity={},samples={}",
                self.num, self.value, self.impurity, self.n_samples
            ),
            Some(s) => write!(
                f,
                "{}:[{} <= {}] yes={},no={},gain={},impurity={},samples={}",
                self.num,
                s.split_feature,
                s.split_value,
                s.left_child,
                s.right_child,
                s.split_gain,
                self.impurity,
                self.n_samples
            ),
        }
    }
}
