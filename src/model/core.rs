use crate::data::Matrix;
use crate::errors::SaplingError;
use crate::model::config::{check_criterion_value, ImportanceMethod, ModelIO, TreeConfig};
use crate::splitter::ExhaustiveSplitter;
use crate::tree::tree::Tree;
use hashbrown::HashMap;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

type ImportanceFn = fn(&Tree, &mut HashMap<usize, (f64, usize)>);

/// Decision tree for classification or regression.
///
/// Fitting grows the tree with recursive binary splits on the configured
/// impurity criterion, then prunes it once with `alpha`. The fitted tree is
/// never modified afterwards, so predictions are read only.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DecisionTreeBase {
    pub cfg: TreeConfig,
    /// Number of rows seen at fit time.
    pub n_samples: usize,
    /// Number of columns seen at fit time.
    pub n_features: usize,
    pub tree: Option<Tree>,
    pub metadata: HashMap<String, String>,
}

impl Default for DecisionTreeBase {
    fn default() -> Self {
        DecisionTreeBase {
            cfg: TreeConfig::default(),
            n_samples: 0,
            n_features: 0,
            tree: None,
            metadata: HashMap::new(),
        }
    }
}

impl DecisionTreeBase {
    /// Create an unfitted model, validating the configuration.
    pub fn new(cfg: TreeConfig) -> Result<Self, SaplingError> {
        let model = DecisionTreeBase {
            cfg,
            ..Default::default()
        };
        model.validate_parameters()?;
        Ok(model)
    }

    /// Unfitted classifier with default hyperparameters and the gini criterion.
    pub fn classifier() -> Self {
        DecisionTreeBase {
            cfg: TreeConfig::classifier(),
            ..Default::default()
        }
    }

    /// Unfitted regressor with default hyperparameters and the squared error criterion.
    pub fn regressor() -> Self {
        DecisionTreeBase {
            cfg: TreeConfig::regressor(),
            ..Default::default()
        }
    }

    pub fn validate_parameters(&self) -> Result<(), SaplingError> {
        self.cfg.validate()
    }

    /// Check the training data before anything is fitted.
    pub fn validate_data(data: &Matrix<f64>, y: &[f64]) -> Result<(), SaplingError> {
        if !data.is_consistent() {
            return Err(SaplingError::InvalidInput(format!(
                "data holds {} values, which does not match {} rows and {} columns",
                data.data.len(),
                data.rows,
                data.cols
            )));
        }
        if data.rows == 0 {
            return Err(SaplingError::InvalidInput("data has no rows".to_string()));
        }
        if data.cols == 0 {
            return Err(SaplingError::InvalidInput("data has no columns".to_string()));
        }
        if y.len() != data.rows {
            return Err(SaplingError::InvalidInput(format!(
                "data has {} rows but y has {} values",
                data.rows,
                y.len()
            )));
        }
        if data.data.iter().any(|v| !v.is_finite()) {
            return Err(SaplingError::InvalidInput("data contains non-finite values".to_string()));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(SaplingError::InvalidInput("y contains non-finite values".to_string()));
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.tree = None;
        self.n_samples = 0;
        self.n_features = 0;
    }

    /// Fit the decision tree on a provided dataset.
    ///
    /// * `data` - Feature matrix, one row per sample.
    /// * `y` - Class codes for a classification criterion, continuous targets for a regression one.
    ///
    /// Any previous fit is replaced. Nothing changes if validation fails.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[f64]) -> Result<(), SaplingError> {
        self.validate_parameters()?;
        Self::validate_data(data, y)?;

        let splitter = ExhaustiveSplitter::new(
            self.cfg.criterion,
            self.cfg.sample_split_min,
            self.cfg.sample_leaf_min,
            self.cfg.impurity_reduction_min,
            self.cfg.threshold_rule,
            data.rows,
        );
        let mut tree = Tree::new();
        tree.fit(data, y, &splitter, self.cfg.max_depth);
        let n_grown = tree.nodes.len();
        tree.prune(self.cfg.alpha);

        info!(
            "Fitted {} tree on {} samples and {} features, nodes: {} grown, {} after pruning, leaves: {}, depth: {}",
            self.cfg.criterion,
            data.rows,
            data.cols,
            n_grown,
            tree.nodes.len(),
            tree.n_leaves,
            tree.depth
        );

        self.n_samples = data.rows;
        self.n_features = data.cols;
        self.tree = Some(tree);
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// The fitted tree, if any.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// The fitted tree, or `NotFitted`.
    pub fn fitted_tree(&self) -> Result<&Tree, SaplingError> {
        self.tree.as_ref().ok_or(SaplingError::NotFitted)
    }

    /// Human readable rendering of the fitted tree.
    pub fn export_text(&self) -> Result<String, SaplingError> {
        let tree = self.fitted_tree()?;
        Ok(format!("Decision Tree\n-------------\n{}", tree.to_text()))
    }

    /// Calculate feature importance measure for the features
    /// in the model. Empty if the model has not been fitted.
    /// - `method`: variable importance method to use.
    /// - `normalize`: whether to normalize the importance values with the sum.
    pub fn calculate_feature_importance(&self, method: ImportanceMethod, normalize: bool) -> HashMap<usize, f64> {
        let (average, importance_fn): (bool, ImportanceFn) = match method {
            ImportanceMethod::Weight => (false, Tree::calculate_importance_weight),
            ImportanceMethod::Gain => (true, Tree::calculate_importance_gain),
            ImportanceMethod::TotalGain => (false, Tree::calculate_importance_gain),
            ImportanceMethod::Cover => (true, Tree::calculate_importance_cover),
            ImportanceMethod::TotalCover => (false, Tree::calculate_importance_cover),
        };
        let mut stats = HashMap::new();
        if let Some(tree) = &self.tree {
            importance_fn(tree, &mut stats);
        }

        let importance = stats
            .iter()
            .map(|(k, (v, c))| if average { (*k, v / (*c as f64)) } else { (*k, *v) })
            .collect::<HashMap<usize, f64>>();

        if normalize {
            // Sum in sorted order so the total does not depend on map iteration order.
            let mut values: Vec<f64> = importance.values().copied().collect();
            values.sort_by(|a, b| a.total_cmp(b));
            let total: f64 = values.iter().sum();
            importance.iter().map(|(k, v)| (*k, v / total)).collect()
        } else {
            importance
        }
    }

    /// Insert metadata
    /// * `key` - String value for the metadata key.
    /// * `value` - value to assign to the metadata key.
    pub fn insert_metadata(&mut self, key: String, value: String) {
        self.metadata.insert(key, value);
    }

    /// Get Metadata
    /// * `key` - Get the associated value for the metadata key.
    pub fn get_metadata(&self, key: &str) -> Option<String> {
        self.metadata.get(key).cloned()
    }
}

impl ModelIO for DecisionTreeBase {
    fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        let value: Value = serde_json::from_str(json_str).map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
        check_criterion_value(value.get("cfg").and_then(|cfg| cfg.get("criterion")))?;
        let model: DecisionTreeBase =
            serde_json::from_value(value).map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
        model.validate_parameters()?;
        Ok(model)
    }
}
