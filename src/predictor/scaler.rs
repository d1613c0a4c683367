use serde::{Deserialize, Serialize};

use super::bundle::PredictError;

// ---------------------------------------------------------------------------
// StandardScaler – re-exported standardization statistics
// ---------------------------------------------------------------------------

/// Per-column standardization fitted at training time: `(x - mean) / scale`.
///
/// `columns` records the training-time column order for reference; the
/// transform itself only enforces the feature-vector width, matching what
/// the original fitting library checks implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Number of feature columns the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a row-major matrix. Fails if any row's width differs
    /// from the training-time column count.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, PredictError> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        if row.len() != self.n_features() {
            return Err(PredictError::FeatureShape {
                expected: self.n_features(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                if scale == 0.0 {
                    0.0
                } else {
                    (x - mean) / scale
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            columns: vec!["a".into(), "b".into()],
            mean: vec![2.0, 10.0],
            scale: vec![2.0, 0.0],
        }
    }

    #[test]
    fn standardizes_and_zeroes_constant_columns() {
        let out = scaler().transform(&[vec![4.0, 99.0], vec![0.0, -3.0]]).unwrap();
        assert_eq!(out, vec![vec![1.0, 0.0], vec![-1.0, 0.0]]);
    }

    #[test]
    fn rejects_wrong_width_rows() {
        let err = scaler().transform(&[vec![1.0]]).unwrap_err();
        match err {
            PredictError::FeatureShape { expected, got } => {
                assert_eq!((expected, got), (2, 1));
            }
        }
    }
}
