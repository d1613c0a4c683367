use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::forest::RandomForest;
use super::scaler::StandardScaler;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Artifact deserialization failure, surfaced once at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("reading artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Inference-time failure at the scaler transform.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("selected {got} predictor columns, but the scaler was fitted on {expected}")]
    FeatureShape { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// PredictorBundle – scaler + classifier, loaded once
// ---------------------------------------------------------------------------

/// The immutable pair of pre-trained artifacts. Loaded at startup and
/// shared read-only by the predict handler for the process lifetime.
#[derive(Debug, Clone)]
pub struct PredictorBundle {
    pub scaler: StandardScaler,
    pub model: RandomForest,
}

/// Batch scoring output: one hard label and one positive-class probability
/// per input row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    pub labels: Vec<bool>,
    pub probabilities: Vec<f64>,
}

impl PredictorBundle {
    /// Deserialize both artifacts. Either file missing or corrupt fails the
    /// whole load; the caller keeps the bundle unavailable.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, ArtifactError> {
        let model: RandomForest = read_artifact(model_path)?;
        let scaler: StandardScaler = read_artifact(scaler_path)?;
        Ok(PredictorBundle { scaler, model })
    }

    /// Scale then classify a row-major feature matrix.
    pub fn score(&self, features: &[Vec<f64>]) -> Result<ScoredBatch, PredictError> {
        let scaled = self.scaler.transform(features)?;
        let probabilities: Vec<f64> = scaled.iter().map(|row| self.model.predict_proba(row)).collect();
        let labels = probabilities
            .iter()
            .map(|&p| p >= RandomForest::DECISION_THRESHOLD)
            .collect();
        Ok(ScoredBatch {
            labels,
            probabilities,
        })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = std::fs::File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::forest::{DecisionTree, TreeNode};

    fn bundle() -> PredictorBundle {
        let tree = DecisionTree {
            root: TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: Box::new(TreeNode::Leaf { probability: 0.2 }),
                right: Box::new(TreeNode::Leaf { probability: 0.8 }),
            },
        };
        PredictorBundle {
            scaler: StandardScaler {
                columns: vec!["sofa_cns".into(), "lactate_score".into()],
                mean: vec![2.0, 1.0],
                scale: vec![1.0, 1.0],
            },
            model: RandomForest {
                n_features: 2,
                trees: vec![tree],
            },
        }
    }

    #[test]
    fn score_is_deterministic() {
        let b = bundle();
        let features = vec![vec![3.0, 1.0], vec![1.0, 1.0]];
        let first = b.score(&features).unwrap();
        let second = b.score(&features).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.labels, vec![true, false]);
        assert_eq!(first.probabilities, vec![0.8, 0.2]);
    }

    #[test]
    fn width_mismatch_fails_at_the_scaler() {
        let b = bundle();
        assert!(matches!(
            b.score(&[vec![3.0]]),
            Err(PredictError::FeatureShape {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn missing_and_corrupt_artifacts_are_distinct_errors() {
        let missing = PredictorBundle::load(
            Path::new("no_such_model.json"),
            Path::new("no_such_scaler.json"),
        );
        assert!(matches!(missing, Err(ArtifactError::Io { .. })));

        let mut corrupt = std::env::temp_dir();
        corrupt.push(format!("sepsis_sentinel_corrupt_{}.json", std::process::id()));
        std::fs::write(&corrupt, "not json").unwrap();
        let parsed = PredictorBundle::load(&corrupt, &corrupt);
        std::fs::remove_file(&corrupt).ok();
        assert!(matches!(parsed, Err(ArtifactError::Parse { .. })));
    }
}
