use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result, bail};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the cohort table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the cell as an `f64` for feature extraction.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the cohort table
// ---------------------------------------------------------------------------

/// One patient row: column_name → value.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// CohortFrame – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed cohort with column order preserved from the source file.
#[derive(Debug, Clone)]
pub struct CohortFrame {
    /// Ordered list of column names (source order, appended columns last).
    pub column_names: Vec<String>,
    /// All patient rows.
    pub rows: Vec<Record>,
}

impl CohortFrame {
    pub fn new(column_names: Vec<String>, rows: Vec<Record>) -> Self {
        CohortFrame { column_names, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cohort is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Cell at (row, column), if present.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Extract one column as `f64`, failing on a missing column or a
    /// non-numeric cell. This is the only schema check the predictor path
    /// performs on the table side.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        if !self.has_column(name) {
            bail!("column '{name}' not found in the loaded cohort");
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.get(name)
                    .and_then(CellValue::as_f64)
                    .with_context(|| format!("row {i}: column '{name}' is not numeric"))
            })
            .collect()
    }

    /// Extract the selected columns as a row-major feature matrix, in the
    /// given column order.
    pub fn feature_matrix(&self, columns: &[String]) -> Result<Vec<Vec<f64>>> {
        let per_column: Vec<Vec<f64>> = columns
            .iter()
            .map(|c| self.numeric_column(c))
            .collect::<Result<_>>()?;

        let mut matrix = vec![Vec::with_capacity(columns.len()); self.len()];
        for col in &per_column {
            for (row, &v) in col.iter().enumerate() {
                matrix[row].push(v);
            }
        }
        Ok(matrix)
    }

    /// Append a column, replacing it if it already exists (repeated predict
    /// runs overwrite their own output columns).
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.len());
        if !self.has_column(name) {
            self.column_names.push(name.to_string());
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(name.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CohortFrame {
        let rows: Vec<Record> = (0..3)
            .map(|i| {
                let mut r = Record::new();
                r.insert("subject_id".into(), CellValue::Integer(100 + i));
                r.insert("sofa_cns".into(), CellValue::Integer(i));
                r.insert("lactate_score".into(), CellValue::Float(i as f64 * 0.5));
                r.insert("note".into(), CellValue::String("obs".into()));
                r
            })
            .collect();
        CohortFrame::new(
            vec![
                "subject_id".into(),
                "sofa_cns".into(),
                "lactate_score".into(),
                "note".into(),
            ],
            rows,
        )
    }

    #[test]
    fn numeric_column_extracts_ints_and_floats() {
        let f = frame();
        assert_eq!(f.numeric_column("sofa_cns").unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(
            f.numeric_column("lactate_score").unwrap(),
            vec![0.0, 0.5, 1.0]
        );
    }

    #[test]
    fn numeric_column_rejects_missing_and_text_columns() {
        let f = frame();
        assert!(f.numeric_column("sofa_liver").is_err());
        assert!(f.numeric_column("note").is_err());
    }

    #[test]
    fn feature_matrix_is_row_major_in_selection_order() {
        let f = frame();
        let m = f
            .feature_matrix(&["lactate_score".to_string(), "sofa_cns".to_string()])
            .unwrap();
        assert_eq!(m, vec![vec![0.0, 0.0], vec![0.5, 1.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn set_column_appends_then_overwrites() {
        let mut f = frame();
        f.set_column("Probability", vec![CellValue::Float(0.1); 3]);
        assert!(f.has_column("Probability"));
        assert_eq!(f.column_names.len(), 5);

        f.set_column("Probability", vec![CellValue::Float(0.9); 3]);
        assert_eq!(f.column_names.len(), 5);
        assert_eq!(f.value(0, "Probability"), Some(&CellValue::Float(0.9)));
    }
}
