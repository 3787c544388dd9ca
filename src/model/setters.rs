use crate::criterion::Criterion;
use crate::model::core::DecisionTreeBase;
use crate::splitter::ThresholdRule;

impl DecisionTreeBase {
    // Set methods for paramters

    /// Set the impurity criterion.
    /// * `criterion` - The criterion used to score splits, it also decides whether
    ///   leaves hold the majority class or the mean target.
    pub fn set_criterion(mut self, criterion: Criterion) -> Self {
        self.cfg.criterion = criterion;
        self
    }

    /// Set the maximum depth of the tree.
    /// * `max_depth` - Maximum depth, or `None` to grow until no split qualifies.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.cfg.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples needed to attempt a split.
    pub fn set_sample_split_min(mut self, sample_split_min: usize) -> Self {
        self.cfg.sample_split_min = sample_split_min;
        self
    }

    /// Set the minimum number of samples allowed in a leaf.
    pub fn set_sample_leaf_min(mut self, sample_leaf_min: usize) -> Self {
        self.cfg.sample_leaf_min = sample_leaf_min;
        self
    }

    /// Set the minimum weighted impurity reduction a split must exceed.
    pub fn set_impurity_reduction_min(mut self, impurity_reduction_min: f64) -> Self {
        self.cfg.impurity_reduction_min = impurity_reduction_min;
        self
    }

    /// Set the pruning strength.
    /// * `alpha` - Splits whose two leaves decrease impurity by less than this are collapsed.
    pub fn set_alpha(mut self, alpha: f64) -> Self {
        self.cfg.alpha = alpha;
        self
    }

    /// Set how candidate thresholds are placed between distinct values.
    pub fn set_threshold_rule(mut self, threshold_rule: ThresholdRule) -> Self {
        self.cfg.threshold_rule = threshold_rule;
        self
    }

    /// Set whether rows are predicted in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }
}
