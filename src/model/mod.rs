pub mod config;
pub mod core;
pub mod predict;
pub mod setters;

pub use self::config::{ImportanceMethod, ModelIO, TreeConfig};
pub use self::core::DecisionTreeBase;
