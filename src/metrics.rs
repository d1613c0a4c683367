use serde::Serialize;

// ---------------------------------------------------------------------------
// Confusion matrix for binary classification
// ---------------------------------------------------------------------------

/// Hard-label counts at the classifier's decision threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfusionMatrix {
    /// True positives — deaths correctly predicted.
    pub tp: usize,
    /// True negatives — survivors correctly predicted.
    pub tn: usize,
    /// False positives — survivors flagged as deaths.
    pub fp: usize,
    /// False negatives — deaths missed.
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one prediction.
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.tp += 1,
            (false, false) => self.tn += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }
}

// ---------------------------------------------------------------------------
// Evaluation metrics
// ---------------------------------------------------------------------------

/// The four scores reported after every prediction run. Zero denominators
/// yield 0.0 rather than NaN.
#[derive(Debug, Clone, Serialize)]
pub struct EvalMetrics {
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1-Score")]
    pub f1: f64,
    #[serde(rename = "AUC-ROC")]
    pub auc_roc: f64,
}

impl EvalMetrics {
    /// Compute all four metrics from true labels, hard predictions, and
    /// positive-class probabilities.
    pub fn compute(y_true: &[bool], predicted: &[bool], probabilities: &[f64]) -> Self {
        let mut cm = ConfusionMatrix::new();
        for (&actual, &pred) in y_true.iter().zip(predicted) {
            cm.record(actual, pred);
        }

        let precision = if cm.tp + cm.fp > 0 {
            cm.tp as f64 / (cm.tp + cm.fp) as f64
        } else {
            0.0
        };
        let recall = if cm.tp + cm.fn_ > 0 {
            cm.tp as f64 / (cm.tp + cm.fn_) as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        EvalMetrics {
            precision,
            recall,
            f1,
            auc_roc: roc_curve(y_true, probabilities).auc(),
        }
    }

    /// Name/value pairs in display order, for the bar chart.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1-Score", self.f1),
            ("AUC-ROC", self.auc_roc),
        ]
    }
}

// ---------------------------------------------------------------------------
// ROC curve
// ---------------------------------------------------------------------------

/// ROC operating points as `[fpr, tpr]`, from (0,0) to (1,1).
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub points: Vec<[f64; 2]>,
}

impl RocCurve {
    /// Trapezoidal area under the curve.
    pub fn auc(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[1][1] + w[0][1]) / 2.0)
            .sum()
    }
}

/// Sweep the decision threshold over the distinct scores, descending, and
/// emit one operating point per threshold. Tied scores collapse into a
/// single point.
pub fn roc_curve(y_true: &[bool], scores: &[f64]) -> RocCurve {
    let positives = y_true.iter().filter(|&&y| y).count();
    let negatives = y_true.len() - positives;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let rate = |count: usize, total: usize| {
        if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        }
    };

    let mut points = vec![[0.0, 0.0]];
    let mut tp = 0;
    let mut fp = 0;
    let mut prev_score = f64::INFINITY;

    for &i in &order {
        if scores[i] != prev_score {
            if prev_score.is_finite() {
                points.push([rate(fp, negatives), rate(tp, positives)]);
            }
            prev_score = scores[i];
        }
        if y_true[i] {
            tp += 1;
        } else {
            fp += 1;
        }
    }
    points.push([rate(fp, negatives), rate(tp, positives)]);

    RocCurve { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_match_hand_computed_reference() {
        let y_true = [false, true, true, false];
        let predicted = [false, true, false, false];
        let probs = [0.1, 0.9, 0.4, 0.2];

        let m = EvalMetrics::compute(&y_true, &predicted, &probs);
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 0.5);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_negative_predictions_yield_zero_scores() {
        let y_true = [true, false];
        let predicted = [false, false];
        let m = EvalMetrics::compute(&y_true, &predicted, &[0.1, 0.1]);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn auc_is_one_for_perfect_separation() {
        let y_true = [false, false, true, true];
        let probs = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_curve(&y_true, &probs).auc(), 1.0);
    }

    #[test]
    fn auc_is_half_when_every_score_ties() {
        let y_true = [true, false, true, false];
        let probs = [0.3; 4];
        let roc = roc_curve(&y_true, &probs);
        assert_eq!(roc.points, vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(roc.auc(), 0.5);
    }

    #[test]
    fn auc_for_one_inversion() {
        // One negative scored above one positive out of 2x2: AUC = 0.75.
        let y_true = [true, false, true, false];
        let probs = [0.9, 0.8, 0.7, 0.1];
        assert!((roc_curve(&y_true, &probs).auc() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn confusion_matrix_counts() {
        let mut cm = ConfusionMatrix::new();
        cm.record(true, true);
        cm.record(true, false);
        cm.record(false, false);
        cm.record(false, true);
        assert_eq!((cm.tp, cm.fn_, cm.tn, cm.fp), (1, 1, 1, 1));
        assert_eq!(cm.total(), 4);
    }
}
