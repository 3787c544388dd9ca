//! Decision trees for classification and regression.
//!
//! A tree is grown with recursive binary splits, each one chosen by an exhaustive
//! search over every feature and threshold for the largest impurity reduction,
//! and is then pruned once, bottom up, against a complexity penalty.
//!
//! ```
//! use sapling::{DecisionTreeBase, Matrix};
//!
//! // Column-major: one feature, four rows.
//! let x = vec![1.0, 2.0, 3.0, 4.0];
//! let data = Matrix::new(&x, 4, 1);
//! let y = vec![1.0, 1.0, 10.0, 10.0];
//!
//! let mut model = DecisionTreeBase::regressor().set_max_depth(Some(1));
//! model.fit(&data, &y).unwrap();
//! assert_eq!(model.predict(&data).unwrap(), y);
//! ```
mod prune;

// Modules
pub mod criterion;
pub mod data;
pub mod errors;
pub mod grower;
pub mod model;
pub mod node;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use criterion::Criterion;
pub use data::Matrix;
pub use errors::SaplingError;
pub use model::{DecisionTreeBase, ImportanceMethod, ModelIO, TreeConfig};
pub use splitter::ThresholdRule;
