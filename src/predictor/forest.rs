use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RandomForest – re-exported tree ensemble
// ---------------------------------------------------------------------------

/// One node of a fitted decision tree. Leaves carry the positive-class
/// probability observed at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        probability: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    /// Walk the tree for one standardized feature row: `<= threshold` goes
    /// left.
    fn score(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { probability } => return *probability,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row.get(*feature).copied().unwrap_or(f64::NAN) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// A fitted random-forest classifier: the ensemble probability is the mean
/// of the tree leaf probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Hard-label cut-off baked into the classifier. Unrelated to the UI's
    /// high-risk alert threshold.
    pub const DECISION_THRESHOLD: f64 = 0.5;

    /// Positive-class probability for one standardized row.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.score(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Hard label at [`Self::DECISION_THRESHOLD`].
    pub fn predict(&self, row: &[f64]) -> bool {
        self.predict_proba(row) >= Self::DECISION_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            root: TreeNode::Split {
                feature,
                threshold,
                left: Box::new(TreeNode::Leaf { probability: low }),
                right: Box::new(TreeNode::Leaf { probability: high }),
            },
        }
    }

    #[test]
    fn probability_is_mean_of_trees() {
        let forest = RandomForest {
            n_features: 2,
            trees: vec![stump(0, 0.0, 0.2, 0.8), stump(1, 0.0, 0.0, 1.0)],
        };
        assert_eq!(forest.predict_proba(&[1.0, -1.0]), 0.4);
        assert_eq!(forest.predict_proba(&[1.0, 1.0]), 0.9);
    }

    #[test]
    fn hard_label_uses_the_baked_in_threshold() {
        let forest = RandomForest {
            n_features: 1,
            trees: vec![stump(0, 0.0, 0.5, 0.49)],
        };
        // exactly 0.5 is the positive class
        assert!(forest.predict(&[-1.0]));
        assert!(!forest.predict(&[1.0]));
    }

    #[test]
    fn artifact_json_roundtrips() {
        let forest = RandomForest {
            n_features: 1,
            trees: vec![stump(0, 0.25, 0.1, 0.9)],
        };
        let json = serde_json::to_string(&forest).unwrap();
        let back: RandomForest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predict_proba(&[0.0]), 0.1);
        assert_eq!(back.predict_proba(&[1.0]), 0.9);
    }
}
