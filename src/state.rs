use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config;
use crate::data::loader;
use crate::data::model::{CellValue, CohortFrame};
use crate::metrics::{EvalMetrics, RocCurve, roc_curve};
use crate::predictor::PredictorBundle;

// ---------------------------------------------------------------------------
// Status messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// Outcome of the last user action, shown in the top bar.
#[derive(Debug, Clone)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Status {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inference report
// ---------------------------------------------------------------------------

/// Everything a successful prediction run produces beyond the two columns
/// appended to the cohort. Recomputed on every run, never persisted.
#[derive(Debug, Clone)]
pub struct InferenceReport {
    pub metrics: EvalMetrics,
    pub roc: RocCurve,
    /// Row indices with probability strictly above the alert threshold.
    pub high_risk: Vec<usize>,
    pub n_rows: usize,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. Created at startup,
/// populated by the load/predict handlers, torn down when the window closes.
pub struct AppState {
    /// Loaded cohort (None until a load succeeds).
    pub cohort: Option<CohortFrame>,

    /// Pre-trained scaler + classifier, loaded once at startup.
    pub bundle: Option<PredictorBundle>,

    /// Why the bundle is unavailable, if it is.
    pub bundle_error: Option<String>,

    /// Predictor columns currently ticked in the side panel.
    pub selected_predictors: BTreeSet<String>,

    /// Output of the last successful prediction run.
    pub report: Option<InferenceReport>,

    /// Status of the last action, shown in the top bar.
    pub status: Option<Status>,
}

impl AppState {
    /// Build the session state and attempt the one-time artifact load.
    pub fn new() -> Self {
        let (bundle, bundle_error) = match PredictorBundle::load(
            Path::new(config::MODEL_PATH),
            Path::new(config::SCALER_PATH),
        ) {
            Ok(bundle) => {
                log::info!(
                    "Loaded predictor bundle ({} trees, {} features)",
                    bundle.model.trees.len(),
                    bundle.scaler.n_features()
                );
                (Some(bundle), None)
            }
            Err(e) => {
                log::error!("Failed to load predictor bundle: {e}");
                (None, Some(e.to_string()))
            }
        };

        AppState {
            cohort: None,
            bundle,
            bundle_error,
            selected_predictors: config::PREDICTORS.iter().map(|p| p.to_string()).collect(),
            report: None,
            status: None,
        }
    }

    // -- Dataset loading -----------------------------------------------------

    /// Handler for the "Load sample data" button.
    pub fn load_sample_data(&mut self) {
        self.load_cohort_file(Path::new(config::SAMPLE_DATA_PATH));
    }

    /// Load a cohort file, replacing the current one only on success.
    pub fn load_cohort_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(frame) => {
                log::info!(
                    "Loaded {} patients from {} with columns {:?}",
                    frame.len(),
                    path.display(),
                    frame.column_names
                );
                self.status = Some(Status::success(format!(
                    "Loaded {} patients from {}",
                    frame.len(),
                    path.display()
                )));
                self.report = None;
                self.cohort = Some(frame);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status = Some(Status::error(format!("Error loading data: {e:#}")));
            }
        }
    }

    // -- Predictor selection -------------------------------------------------

    pub fn toggle_predictor(&mut self, name: &str) {
        if !self.selected_predictors.remove(name) {
            self.selected_predictors.insert(name.to_string());
        }
    }

    pub fn select_all_predictors(&mut self) {
        self.selected_predictors = config::PREDICTORS.iter().map(|p| p.to_string()).collect();
    }

    pub fn select_no_predictors(&mut self) {
        self.selected_predictors.clear();
    }

    /// Selected predictors in the configured (training-time) order.
    pub fn selection_in_config_order(&self) -> Vec<String> {
        config::PREDICTORS
            .iter()
            .filter(|p| self.selected_predictors.contains(**p))
            .map(|p| p.to_string())
            .collect()
    }

    // -- Prediction ----------------------------------------------------------

    /// Handler for the "Predict" button: score the cohort, append the
    /// output columns, evaluate against the ground truth.
    pub fn run_prediction(&mut self) {
        if self.cohort.is_none() || self.selected_predictors.is_empty() {
            self.status = Some(Status::error(
                "Load data and select at least one predictor first.",
            ));
            return;
        }
        if self.bundle.is_none() {
            self.status = Some(Status::error(
                "Model and scaler are unavailable; check the artifact files.",
            ));
            return;
        }

        let columns = self.selection_in_config_order();
        let frame = self.cohort.as_mut().unwrap();
        let bundle = self.bundle.as_ref().unwrap();

        match predict_and_evaluate(frame, &columns, bundle) {
            Ok(report) => {
                log::info!(
                    "Scored {} patients: AUC-ROC {:.3}, {} high-risk",
                    report.n_rows,
                    report.metrics.auc_roc,
                    report.high_risk.len()
                );
                self.status = Some(Status::success(format!(
                    "Scored {} patients ({} high-risk)",
                    report.n_rows,
                    report.high_risk.len()
                )));
                self.report = Some(report);
            }
            Err(e) => {
                log::error!("Prediction failed: {e:#}");
                self.status = Some(Status::error(format!("Error running prediction: {e:#}")));
            }
        }
    }
}

/// Slice the cohort to the selected columns, scale, classify, append the
/// output columns, and evaluate. The output columns are only appended after
/// scoring succeeds, but callers still treat a failure as possibly having
/// mutated the frame.
fn predict_and_evaluate(
    frame: &mut CohortFrame,
    columns: &[String],
    bundle: &PredictorBundle,
) -> Result<InferenceReport> {
    let y_true: Vec<bool> = frame
        .numeric_column(config::TARGET)
        .context("extracting ground-truth labels")?
        .into_iter()
        .map(|v| v != 0.0)
        .collect();

    let features = frame
        .feature_matrix(columns)
        .context("extracting predictor columns")?;
    let scored = bundle.score(&features)?;

    frame.set_column(
        config::PREDICTION_COLUMN,
        scored
            .labels
            .iter()
            .map(|&label| CellValue::Integer(label as i64))
            .collect(),
    );
    frame.set_column(
        config::PROBABILITY_COLUMN,
        scored
            .probabilities
            .iter()
            .map(|&p| CellValue::Float(p))
            .collect(),
    );

    let metrics = EvalMetrics::compute(&y_true, &scored.labels, &scored.probabilities);
    let roc = roc_curve(&y_true, &scored.probabilities);
    let high_risk = scored
        .probabilities
        .iter()
        .enumerate()
        .filter(|(_, &p)| p > config::HIGH_RISK_THRESHOLD)
        .map(|(i, _)| i)
        .collect();

    Ok(InferenceReport {
        metrics,
        roc,
        high_risk,
        n_rows: frame.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::predictor::forest::{DecisionTree, RandomForest, TreeNode};
    use crate::predictor::scaler::StandardScaler;

    fn leaf_forest(probability: f64) -> RandomForest {
        RandomForest {
            n_features: config::PREDICTORS.len(),
            trees: vec![DecisionTree {
                root: TreeNode::Leaf { probability },
            }],
        }
    }

    fn test_bundle(probability: f64) -> PredictorBundle {
        PredictorBundle {
            scaler: StandardScaler {
                columns: config::PREDICTORS.iter().map(|p| p.to_string()).collect(),
                mean: vec![2.0; config::PREDICTORS.len()],
                scale: vec![1.0; config::PREDICTORS.len()],
            },
            model: leaf_forest(probability),
        }
    }

    fn test_frame(n: usize) -> CohortFrame {
        let mut columns: Vec<String> = config::ID_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(config::PREDICTORS.iter().map(|p| p.to_string()));
        columns.push(config::TARGET.to_string());

        let rows = (0..n)
            .map(|i| {
                let mut row = Record::new();
                row.insert("subject_id".into(), CellValue::Integer(10000 + i as i64));
                row.insert("icustay_id".into(), CellValue::Integer(200000 + i as i64));
                for p in config::PREDICTORS {
                    row.insert(p.to_string(), CellValue::Integer((i % 5) as i64));
                }
                row.insert(
                    config::TARGET.to_string(),
                    CellValue::Integer((i % 2) as i64),
                );
                row
            })
            .collect();
        CohortFrame::new(columns, rows)
    }

    fn state_with(frame: Option<CohortFrame>, bundle: Option<PredictorBundle>) -> AppState {
        AppState {
            cohort: frame,
            bundle,
            bundle_error: None,
            selected_predictors: config::PREDICTORS.iter().map(|p| p.to_string()).collect(),
            report: None,
            status: None,
        }
    }

    #[test]
    fn predict_without_data_is_a_precondition_error() {
        let mut state = state_with(None, Some(test_bundle(0.8)));
        state.run_prediction();
        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
        assert!(state.report.is_none());
    }

    #[test]
    fn predict_with_empty_selection_does_not_mutate_the_frame() {
        let mut state = state_with(Some(test_frame(4)), Some(test_bundle(0.8)));
        state.select_no_predictors();
        state.run_prediction();

        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
        let frame = state.cohort.as_ref().unwrap();
        assert!(!frame.has_column(config::PREDICTION_COLUMN));
        assert!(!frame.has_column(config::PROBABILITY_COLUMN));
    }

    #[test]
    fn predict_without_bundle_is_an_error() {
        let mut state = state_with(Some(test_frame(4)), None);
        state.run_prediction();
        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
    }

    #[test]
    fn successful_run_appends_columns_and_reports() {
        let mut state = state_with(Some(test_frame(6)), Some(test_bundle(0.8)));
        state.run_prediction();

        let frame = state.cohort.as_ref().unwrap();
        assert!(frame.has_column(config::PREDICTION_COLUMN));
        assert!(frame.has_column(config::PROBABILITY_COLUMN));
        assert_eq!(frame.value(0, config::PREDICTION_COLUMN), Some(&CellValue::Integer(1)));

        let report = state.report.as_ref().unwrap();
        assert_eq!(report.n_rows, 6);
        // every row scored 0.8 > 0.7
        assert_eq!(report.high_risk.len(), 6);
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let mut state = state_with(Some(test_frame(6)), Some(test_bundle(0.42)));
        state.run_prediction();
        let first = state.cohort.as_ref().unwrap().numeric_column(config::PROBABILITY_COLUMN).unwrap();
        state.run_prediction();
        let second = state.cohort.as_ref().unwrap().numeric_column(config::PROBABILITY_COLUMN).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn high_risk_excludes_the_boundary_probability() {
        let mut at_boundary = state_with(Some(test_frame(3)), Some(test_bundle(0.7)));
        at_boundary.run_prediction();
        assert!(at_boundary.report.as_ref().unwrap().high_risk.is_empty());

        let mut above = state_with(Some(test_frame(3)), Some(test_bundle(0.71)));
        above.run_prediction();
        assert_eq!(above.report.as_ref().unwrap().high_risk, vec![0, 1, 2]);
    }

    #[test]
    fn missing_target_column_is_a_caught_inference_error() {
        let mut frame = test_frame(3);
        frame.column_names.retain(|c| c != config::TARGET);
        for row in &mut frame.rows {
            row.remove(config::TARGET);
        }
        let mut state = state_with(Some(frame), Some(test_bundle(0.8)));
        state.run_prediction();
        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
        assert!(state.report.is_none());
    }

    #[test]
    fn failed_load_leaves_prior_state_untouched() {
        let mut state = state_with(Some(test_frame(2)), Some(test_bundle(0.5)));
        state.load_cohort_file(Path::new("definitely_missing.csv"));
        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
        assert_eq!(state.cohort.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn partial_selection_fails_at_the_scaler_width_check() {
        let mut state = state_with(Some(test_frame(3)), Some(test_bundle(0.8)));
        state.selected_predictors = ["sofa_cns".to_string()].into_iter().collect();
        state.run_prediction();
        assert!(matches!(
            state.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        ));
        assert!(state.report.is_none());
    }
}
