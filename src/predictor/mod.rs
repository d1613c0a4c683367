/// Predictor layer: the pre-trained artifacts and batch scoring.
///
/// The scaler and classifier are fitted outside this repository and
/// re-exported as JSON artifacts; this module only deserializes and applies
/// them.
///
/// ```text
///   scaler.json ──┐
///                 ├──▶ PredictorBundle ──▶ scale → forest → labels + probabilities
///   rf_model_mortality.json ──┘
/// ```

pub mod bundle;
pub mod forest;
pub mod scaler;

pub use bundle::PredictorBundle;
