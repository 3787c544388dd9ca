use crate::data::Matrix;
use crate::errors::SaplingError;
use crate::model::core::DecisionTreeBase;

impl DecisionTreeBase {
    fn check_features(&self, n_features: usize) -> Result<(), SaplingError> {
        if n_features != self.n_features {
            return Err(SaplingError::InvalidInput(format!(
                "model was fitted with {} features but {} were provided",
                self.n_features, n_features
            )));
        }
        Ok(())
    }

    /// Generate predictions for every row of `data`, in row order.
    ///
    /// * `data` - Feature matrix with the same number of columns seen at fit time.
    pub fn predict(&self, data: &Matrix<f64>) -> Result<Vec<f64>, SaplingError> {
        let tree = self.fitted_tree()?;
        self.check_features(data.cols)?;
        if !data.is_consistent() {
            return Err(SaplingError::InvalidInput(format!(
                "data holds {} values, which does not match {} rows and {} columns",
                data.data.len(),
                data.rows,
                data.cols
            )));
        }
        Ok(tree.predict(data, self.cfg.parallel))
    }

    /// Predict a single feature vector.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, SaplingError> {
        let tree = self.fitted_tree()?;
        self.check_features(row.len())?;
        Ok(tree.predict_row_from_row_slice(row))
    }
}
