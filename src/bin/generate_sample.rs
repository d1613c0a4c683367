//! Generates a deterministic synthetic ICU cohort (`sample_data.csv`) and
//! re-exports matching demo artifacts (`scaler.json`,
//! `rf_model_mortality.json`). Development tool; the dashboard only ever
//! reads these files.

use serde_json::json;

const PREDICTORS: [&str; 9] = [
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

/// Latent-risk weights per predictor, mirroring how strongly each sub-score
/// drives the simulated outcome.
const WEIGHTS: [f64; 9] = [0.55, 0.40, 0.50, 0.45, 0.35, 0.60, 0.50, 0.25, 0.30];
const BIAS: f64 = -7.0;

const N_PATIENTS: usize = 200;

/// Forest shape: trees grown on shuffled feature orders until the cell is
/// too small to split further.
const N_TREES: usize = 15;
const MAX_DEPTH: usize = 6;
const MIN_SPLIT: usize = 6;

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Fisher-Yates
    fn shuffle(&mut self, xs: &mut [usize]) {
        for i in (1..xs.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            xs.swap(i, j);
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn main() {
    let mut rng = SimpleRng::new(7);

    // ---- Simulate the cohort ----
    let mut scores: Vec<[i64; 9]> = Vec::with_capacity(N_PATIENTS);
    let mut expired: Vec<bool> = Vec::with_capacity(N_PATIENTS);

    for _ in 0..N_PATIENTS {
        let mut row = [0i64; 9];
        for slot in &mut row {
            *slot = (rng.gauss(1.5, 1.2).round() as i64).clamp(0, 4);
        }

        let logit: f64 = BIAS
            + row
                .iter()
                .zip(WEIGHTS)
                .map(|(&s, w)| s as f64 * w)
                .sum::<f64>()
            + rng.gauss(0.0, 0.4);
        expired.push(rng.next_f64() < sigmoid(logit));
        scores.push(row);
    }

    // ---- Write the cohort CSV ----
    let csv_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create sample CSV");
    let mut header = vec!["subject_id", "icustay_id"];
    header.extend(PREDICTORS);
    header.push("hospital_expire_flag");
    writer.write_record(&header).expect("Failed to write header");

    for (i, (row, &died)) in scores.iter().zip(&expired).enumerate() {
        let mut record = vec![
            (10000 + i as i64).to_string(),
            (200000 + 3 * i as i64).to_string(),
        ];
        record.extend(row.iter().map(|s| s.to_string()));
        record.push(if died { "1" } else { "0" }.to_string());
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Fit the scaler statistics ----
    let n = N_PATIENTS as f64;
    let mut mean = [0.0f64; 9];
    let mut scale = [0.0f64; 9];
    for j in 0..9 {
        mean[j] = scores.iter().map(|r| r[j] as f64).sum::<f64>() / n;
        let var = scores
            .iter()
            .map(|r| (r[j] as f64 - mean[j]).powi(2))
            .sum::<f64>()
            / n;
        scale[j] = var.sqrt();
    }

    let scaler = json!({
        "columns": PREDICTORS,
        "mean": mean,
        "scale": scale,
    });
    std::fs::write(
        "scaler.json",
        serde_json::to_string_pretty(&scaler).expect("Failed to serialize scaler"),
    )
    .expect("Failed to write scaler.json");

    // ---- Grow the forest on the simulated outcomes ----
    let standardized: Vec<Vec<f64>> = scores
        .iter()
        .map(|row| {
            (0..9)
                .map(|j| {
                    if scale[j] == 0.0 {
                        0.0
                    } else {
                        (row[j] as f64 - mean[j]) / scale[j]
                    }
                })
                .collect()
        })
        .collect();
    let overall_rate = expired.iter().filter(|&&d| d).count() as f64 / n;

    let mut trees = Vec::with_capacity(N_TREES);
    for _ in 0..N_TREES {
        let mut features: Vec<usize> = (0..9).collect();
        rng.shuffle(&mut features);
        let root = grow_node(
            &features,
            0,
            (0..N_PATIENTS).collect(),
            &standardized,
            &expired,
            overall_rate,
        );
        trees.push(json!({ "root": root }));
    }

    let forest = json!({
        "n_features": PREDICTORS.len(),
        "trees": trees,
    });
    std::fs::write(
        "rf_model_mortality.json",
        serde_json::to_string_pretty(&forest).expect("Failed to serialize forest"),
    )
    .expect("Failed to write rf_model_mortality.json");

    println!(
        "Wrote {N_PATIENTS} patients to {csv_path} ({} deaths), scaler.json, rf_model_mortality.json ({N_TREES} trees)",
        expired.iter().filter(|&&d| d).count(),
    );
}

/// Recursively split one node at the standardized mean of the next feature
/// in this tree's shuffled order; leaves carry the cell's death rate.
fn grow_node(
    features: &[usize],
    depth: usize,
    idxs: Vec<usize>,
    standardized: &[Vec<f64>],
    expired: &[bool],
    overall_rate: f64,
) -> serde_json::Value {
    let rate = if idxs.is_empty() {
        overall_rate
    } else {
        idxs.iter().filter(|&&i| expired[i]).count() as f64 / idxs.len() as f64
    };
    if depth == MAX_DEPTH || idxs.len() < MIN_SPLIT {
        return json!({ "Leaf": { "probability": rate } });
    }

    let feature = features[depth];
    let (left, right): (Vec<usize>, Vec<usize>) = idxs
        .into_iter()
        .partition(|&i| standardized[i][feature] <= 0.0);
    if left.is_empty() || right.is_empty() {
        return json!({ "Leaf": { "probability": rate } });
    }

    json!({
        "Split": {
            "feature": feature,
            "threshold": 0.0,
            "left": grow_node(features, depth + 1, left, standardized, expired, overall_rate),
            "right": grow_node(features, depth + 1, right, standardized, expired, overall_rate),
        }
    })
}
