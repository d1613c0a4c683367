// ---------------------------------------------------------------------------
// Static application configuration
// ---------------------------------------------------------------------------

/// Predictor columns the bundled model was trained on: the six SOFA organ
/// sub-scores plus three derived severity scores.
pub const PREDICTORS: [&str; 9] = [
    "sofa_coag",
    "sofa_liver",
    "sofa_renal",
    "sofa_cv_bp",
    "sofa_cv_hr",
    "sofa_cns",
    "lactate_score",
    "wbc_score",
    "fluid_balance_score",
];

/// Ground-truth outcome column (in-hospital death flag). Evaluation only,
/// never a model input.
pub const TARGET: &str = "hospital_expire_flag";

/// Identifier columns shown alongside predictions.
pub const ID_COLUMNS: [&str; 2] = ["subject_id", "icustay_id"];

/// Columns appended to the cohort by a prediction run.
pub const PREDICTION_COLUMN: &str = "Prediction";
pub const PROBABILITY_COLUMN: &str = "Probability";

/// Artifact and sample-data paths, relative to the working directory.
pub const MODEL_PATH: &str = "rf_model_mortality.json";
pub const SCALER_PATH: &str = "scaler.json";
pub const SAMPLE_DATA_PATH: &str = "sample_data.csv";

/// Alert threshold for the high-risk list: rows with predicted mortality
/// probability strictly above this value. Independent of the classifier's
/// 0.5 decision threshold.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Rows shown in the cohort preview table.
pub const PREVIEW_ROWS: usize = 10;
