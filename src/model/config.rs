//! Model Configuration
//!
//! Hyperparameters of a decision tree, their defaults and their validation,
//! along with the JSON persistence shared by the configuration and the model.
use crate::criterion::Criterion;
use crate::errors::SaplingError;
use crate::splitter::ThresholdRule;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Method to calculate variable importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ImportanceMethod {
    /// The number of times a feature is used to split the data.
    Weight,
    /// The average impurity reduction across all splits the feature is used in.
    Gain,
    /// The average number of samples reaching the splits the feature is used in.
    Cover,
    /// The total impurity reduction across all splits the feature is used in.
    TotalGain,
    /// The total number of samples reaching the splits the feature is used in.
    TotalCover,
}

fn default_criterion() -> Criterion {
    Criterion::Gini
}
fn default_max_depth() -> Option<usize> {
    None
}
fn default_sample_split_min() -> usize {
    2
}
fn default_sample_leaf_min() -> usize {
    1
}
fn default_impurity_reduction_min() -> f64 {
    0.0
}
fn default_alpha() -> f64 {
    0.0
}

/// Configuration for a `DecisionTreeBase`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TreeConfig {
    /// Impurity criterion, which also decides between classification and regression.
    #[serde(default = "default_criterion")]
    pub criterion: Criterion,
    /// Maximum depth of the tree, unbounded when `None`.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    /// Minimum number of samples a region needs before a split is attempted.
    #[serde(default = "default_sample_split_min")]
    pub sample_split_min: usize,
    /// Minimum number of samples each side of a split must receive.
    #[serde(default = "default_sample_leaf_min")]
    pub sample_leaf_min: usize,
    /// A split is only accepted if its weighted impurity reduction is strictly above this.
    #[serde(default = "default_impurity_reduction_min")]
    pub impurity_reduction_min: f64,
    /// Pruning strength, splits of leaf pairs that decrease impurity by less are collapsed.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// How candidate thresholds are placed between distinct feature values.
    #[serde(default)]
    pub threshold_rule: ThresholdRule,
    /// Predict rows in parallel.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: default_criterion(),
            max_depth: default_max_depth(),
            sample_split_min: default_sample_split_min(),
            sample_leaf_min: default_sample_leaf_min(),
            impurity_reduction_min: default_impurity_reduction_min(),
            alpha: default_alpha(),
            threshold_rule: ThresholdRule::default(),
            parallel: false,
        }
    }
}

impl TreeConfig {
    /// Default configuration for classification, using the gini criterion.
    pub fn classifier() -> Self {
        TreeConfig::default()
    }

    /// Default configuration for regression, using the squared error criterion.
    pub fn regressor() -> Self {
        TreeConfig {
            criterion: Criterion::SquaredError,
            ..TreeConfig::default()
        }
    }

    /// Check every hyperparameter, failing on the first invalid one.
    pub fn validate(&self) -> Result<(), SaplingError> {
        if self.max_depth == Some(0) {
            return Err(SaplingError::InvalidConfiguration(
                "max_depth".to_string(),
                "a positive integer or None".to_string(),
                "0".to_string(),
            ));
        }
        if self.sample_split_min < 2 {
            return Err(SaplingError::InvalidConfiguration(
                "sample_split_min".to_string(),
                "an integer >= 2".to_string(),
                self.sample_split_min.to_string(),
            ));
        }
        if self.sample_leaf_min < 1 {
            return Err(SaplingError::InvalidConfiguration(
                "sample_leaf_min".to_string(),
                "an integer >= 1".to_string(),
                self.sample_leaf_min.to_string(),
            ));
        }
        if !self.impurity_reduction_min.is_finite() || self.impurity_reduction_min < 0.0 {
            return Err(SaplingError::InvalidConfiguration(
                "impurity_reduction_min".to_string(),
                "a finite float >= 0".to_string(),
                self.impurity_reduction_min.to_string(),
            ));
        }
        if !self.alpha.is_finite() {
            return Err(SaplingError::InvalidConfiguration(
                "alpha".to_string(),
                "a finite float".to_string(),
                self.alpha.to_string(),
            ));
        }
        Ok(())
    }
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), SaplingError> {
        fs::write(path, self.json_dump()?).map_err(|e| SaplingError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json object
    fn json_dump(&self) -> Result<String, SaplingError> {
        serde_json::to_string(self).map_err(|e| SaplingError::UnableToWrite(e.to_string()))
    }

    /// Load from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| SaplingError::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load_model<P: AsRef<Path>>(path: P) -> Result<Self, SaplingError> {
        let json_str = fs::read_to_string(path).map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

/// Check the criterion name held at `value`, if any, so an unknown name
/// reports the same error as `Criterion::from_str`.
pub(crate) fn check_criterion_value(value: Option<&Value>) -> Result<(), SaplingError> {
    match value.and_then(|v| v.as_str()) {
        Some(name) => name.parse::<Criterion>().map(|_| ()),
        None => Ok(()),
    }
}

impl ModelIO for TreeConfig {
    fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        let value: Value = serde_json::from_str(json_str).map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
        check_criterion_value(value.get("criterion"))?;
        let config: TreeConfig = serde_json::from_value(value).map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
