//! Criteria
//!
//! Impurity measures used to score a region of the training data, together
//! with the leaf value calculator that goes with each of them.
use crate::errors::SaplingError;
use crate::utils::{items_to_strings, majority_vote, mean, most_frequent, unique_counts};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maps the targets of a region to a scalar impurity.
pub type ImpurityFn = fn(&[f64]) -> f64;
/// Maps the targets of a region to the value predicted by a leaf.
pub type LeafValueFn = fn(&[f64]) -> f64;

/// The kind of problem a criterion is meant for.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Classification,
    Regression,
}

/// Splitting criterion selector.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Criterion {
    /// Gini impurity, `sum_k p_k (1 - p_k)`.
    Gini,
    /// Misclassification rate of the majority class, `1 - p_max`.
    LogLoss,
    /// `sum_k p_k ln(p_k)`. This is non-positive, it is not negated.
    Entropy,
    /// Mean squared deviation from the mean.
    SquaredError,
    /// Mean absolute deviation from the mean.
    AbsoluteError,
}

const CRITERION_NAMES: [&str; 5] = ["gini", "log_loss", "entropy", "squared_error", "absolute_error"];

impl FromStr for Criterion {
    type Err = SaplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gini" => Ok(Criterion::Gini),
            "log_loss" => Ok(Criterion::LogLoss),
            "entropy" => Ok(Criterion::Entropy),
            "squared_error" => Ok(Criterion::SquaredError),
            "absolute_error" => Ok(Criterion::AbsoluteError),
            _ => Err(SaplingError::InvalidConfiguration(
                "criterion".to_string(),
                items_to_strings(CRITERION_NAMES.to_vec()),
                s.to_string(),
            )),
        }
    }
}

impl TryFrom<String> for Criterion {
    type Error = SaplingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Criterion::Gini => CRITERION_NAMES[0],
            Criterion::LogLoss => CRITERION_NAMES[1],
            Criterion::Entropy => CRITERION_NAMES[2],
            Criterion::SquaredError => CRITERION_NAMES[3],
            Criterion::AbsoluteError => CRITERION_NAMES[4],
        };
        write!(f, "{}", name)
    }
}

impl Criterion {
    pub fn task(&self) -> Task {
        match self {
            Criterion::Gini | Criterion::LogLoss | Criterion::Entropy => Task::Classification,
            Criterion::SquaredError | Criterion::AbsoluteError => Task::Regression,
        }
    }

    /// Impurity of a region under this criterion.
    pub fn impurity(&self, y: &[f64]) -> f64 {
        let (impurity, _) = criterion_callables(self);
        impurity(y)
    }

    /// Prediction a leaf holding `y` would make: majority class for
    /// classification, arithmetic mean for regression.
    pub fn leaf_value(&self, y: &[f64]) -> f64 {
        let (_, leaf_value) = criterion_callables(self);
        leaf_value(y)
    }
}

pub fn criterion_callables(criterion: &Criterion) -> (ImpurityFn, LeafValueFn) {
    let impurity: ImpurityFn = match criterion {
        Criterion::Gini => gini,
        Criterion::LogLoss => log_loss,
        Criterion::Entropy => entropy,
        Criterion::SquaredError => squared_error,
        Criterion::AbsoluteError => absolute_error,
    };
    let leaf_value: LeafValueFn = match criterion.task() {
        Task::Classification => majority_vote,
        Task::Regression => mean,
    };
    (impurity, leaf_value)
}

/// Class proportions `p_k` in ascending class order.
fn proportions(y: &[f64]) -> impl Iterator<Item = f64> {
    let n = y.len() as f64;
    unique_counts(y).into_iter().map(move |(_, c)| c as f64 / n)
}

pub fn gini(y: &[f64]) -> f64 {
    if y.is_empty() {
        return f64::NAN;
    }
    proportions(y).map(|p| p * (1.0 - p)).sum()
}

pub fn log_loss(y: &[f64]) -> f64 {
    match most_frequent(y) {
        Some((_, count)) => 1.0 - count as f64 / y.len() as f64,
        None => f64::NAN,
    }
}

pub fn entropy(y: &[f64]) -> f64 {
    if y.is_empty() {
        return f64::NAN;
    }
    proportions(y).map(|p| p * p.ln()).sum()
}

pub fn squared_error(y: &[f64]) -> f64 {
    let m = mean(y);
    y.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / y.len() as f64
}

pub fn absolute_error(y: &[f64]) -> f64 {
    let m = mean(y);
    y.iter().map(|v| (v - m).abs()).sum::<f64>() / y.len() as f64
}
