//! Splitter
//!
//! Candidate threshold enumeration, row partitioning and the exhaustive search
//! for the best split of a region.
use crate::criterion::{criterion_callables, Criterion, ImpurityFn, LeafValueFn};
use crate::data::Matrix;
use crate::node::SplittableNode;
use crate::utils::unique_sorted;
use serde::{Deserialize, Serialize};

/// How a candidate threshold is derived from two adjacent distinct values.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdRule {
    /// `0.5 * (v[i] + v[i + 1])`.
    #[default]
    Midpoint,
    /// `v[i + 1]`, the upper value of the pair. This never isolates the smallest
    /// distinct value on the left, and offers a candidate at the maximum that
    /// leaves the right side empty.
    UpperValue,
}

impl ThresholdRule {
    fn threshold(&self, lower: f64, upper: f64) -> f64 {
        match self {
            ThresholdRule::Midpoint => 0.5 * (lower + upper),
            ThresholdRule::UpperValue => upper,
        }
    }
}

/// Candidate thresholds for a feature column, one fewer than the number of
/// distinct values, in ascending order.
pub fn split_thresholds(column: &[f64], rule: ThresholdRule) -> Vec<f64> {
    unique_sorted(column)
        .windows(2)
        .map(|w| rule.threshold(w[0], w[1]))
        .collect()
}

/// Partition the rows in `index` on `feature`, rows at or below `threshold` go
/// left and the rest go right. Input order is preserved on both sides.
pub fn partition(data: &Matrix<f64>, index: &[usize], feature: usize, threshold: f64) -> (Vec<usize>, Vec<usize>) {
    let column = data.get_col(feature);
    index.iter().copied().partition(|&i| column[i] <= threshold)
}

/// Gather the targets of the rows in `index`.
pub fn gather(y: &[f64], index: &[usize]) -> Vec<f64> {
    index.iter().map(|&i| y[i]).collect()
}

/// The best split found for a region.
#[derive(Debug)]
pub struct SplitInfo {
    pub split_gain: f64,
    pub split_feature: usize,
    pub split_value: f64,
    pub left_index: Vec<usize>,
    pub right_index: Vec<usize>,
}

pub trait Splitter {
    /// Impurity of a region's targets.
    fn impurity(&self, y: &[f64]) -> f64;

    /// Value a leaf holding these targets predicts.
    fn leaf_value(&self, y: &[f64]) -> f64;

    /// Find the best split for a region, or `None` when the region should
    /// stay a leaf.
    fn best_split(&self, data: &Matrix<f64>, y: &[f64], node: &SplittableNode, parent_impurity: f64)
        -> Option<SplitInfo>;
}

/// Tries every threshold of every feature, in feature order and then
/// ascending threshold order. The first candidate with the largest reduction wins.
pub struct ExhaustiveSplitter {
    pub impurity_fn: ImpurityFn,
    pub leaf_value_fn: LeafValueFn,
    pub sample_split_min: usize,
    pub sample_leaf_min: usize,
    pub impurity_reduction_min: f64,
    pub threshold_rule: ThresholdRule,
    /// Number of rows in the whole training set.
    pub n_total: usize,
}

impl ExhaustiveSplitter {
    pub fn new(
        criterion: Criterion,
        sample_split_min: usize,
        sample_leaf_min: usize,
        impurity_reduction_min: f64,
        threshold_rule: ThresholdRule,
        n_total: usize,
    ) -> Self {
        let (impurity_fn, leaf_value_fn) = criterion_callables(&criterion);
        ExhaustiveSplitter {
            impurity_fn,
            leaf_value_fn,
            sample_split_min,
            sample_leaf_min,
            impurity_reduction_min,
            threshold_rule,
            n_total,
        }
    }

    /// Impurity reduction of a split, weighted by the share of the training
    /// set that reaches the region.
    pub fn reduction_impurity(&self, parent_impurity: f64, y_left: &[f64], y_right: &[f64]) -> f64 {
        let n_left = y_left.len() as f64;
        let n_right = y_right.len() as f64;
        let n_region = n_left + n_right;
        let reduction = parent_impurity
            - (n_right / n_region) * (self.impurity_fn)(y_right)
            - (n_left / n_region) * (self.impurity_fn)(y_left);
        reduction * (n_region / self.n_total as f64)
    }
}

impl Splitter for ExhaustiveSplitter {
    fn impurity(&self, y: &[f64]) -> f64 {
        (self.impurity_fn)(y)
    }

    fn leaf_value(&self, y: &[f64]) -> f64 {
        (self.leaf_value_fn)(y)
    }

    fn best_split(
        &self,
        data: &Matrix<f64>,
        y: &[f64],
        node: &SplittableNode,
        parent_impurity: f64,
    ) -> Option<SplitInfo> {
        if node.index.len() < self.sample_split_min {
            return None;
        }

        // Only reductions strictly above zero are ever kept.
        let mut most_gain = 0.0;
        let mut best: Option<SplitInfo> = None;
        for feature in 0..data.cols {
            let column = data.get_col(feature);
            let values = gather(column, &node.index);
            for threshold in split_thresholds(&values, self.threshold_rule) {
                let (left_index, right_index) = partition(data, &node.index, feature, threshold);
                if left_index.len() < self.sample_leaf_min || right_index.len() < self.sample_leaf_min {
                    continue;
                }
                let gain = self.reduction_impurity(parent_impurity, &gather(y, &left_index), &gather(y, &right_index));
                if gain > most_gain {
                    most_gain = gain;
                    best = Some(SplitInfo {
                        split_gain: gain,
                        split_feature: feature,
                        split_value: threshold,
                        left_index,
                        right_index,
                    });
                }
            }
        }

        best.filter(|s| s.split_gain > self.impurity_reduction_min)
    }
}
