use super::tree::Tree;
use crate::Matrix;
use rayon::prelude::*;

impl Tree {
    fn predict_row(&self, data: &Matrix<f64>, row: usize) -> f64 {
        let mut node_idx = 0;
        loop {
            let Some(node) = self.nodes.get(&node_idx) else {
                return f64::NAN;
            };
            match &node.split {
                None => return node.value,
                Some(split) => node_idx = split.get_child_idx(*data.get(row, split.split_feature)),
            }
        }
    }

    /// Predict from a pre-sliced row (no matrix lookup).
    pub fn predict_row_from_row_slice(&self, row: &[f64]) -> f64 {
        let mut node_idx = 0;
        loop {
            let Some(node) = self.nodes.get(&node_idx) else {
                return f64::NAN;
            };
            match &node.split {
                None => return node.value,
                Some(split) => node_idx = split.get_child_idx(row[split.split_feature]),
            }
        }
    }

    /// Nodes visited from the root down to the leaf a row falls in.
    pub fn decision_path(&self, row: &[f64]) -> Vec<usize> {
        let mut node_idx = 0;
        let mut path = Vec::new();
        while let Some(node) = self.nodes.get(&node_idx) {
            path.push(node_idx);
            match &node.split {
                None => break,
                Some(split) => node_idx = split.get_child_idx(row[split.split_feature]),
            }
        }
        path
    }

    fn predict_single_threaded(&self, data: &Matrix<f64>) -> Vec<f64> {
        data.index.iter().map(|i| self.predict_row(data, *i)).collect()
    }

    fn predict_parallel(&self, data: &Matrix<f64>) -> Vec<f64> {
        data.index.par_iter().map(|i| self.predict_row(data, *i)).collect()
    }

    /// Generate predictions for a full dataset, in row order.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Vec<f64> {
        if parallel {
            self.predict_parallel(data)
        } else {
            self.predict_single_threaded(data)
        }
    }
}
