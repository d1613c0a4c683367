use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::risk_color;
use crate::config;
use crate::data::model::{CellValue, CohortFrame};

const HEADER_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Cohort preview – first rows, all columns
// ---------------------------------------------------------------------------

/// Preview of the loaded cohort before any prediction run.
pub fn cohort_preview(ui: &mut Ui, frame: &CohortFrame) {
    let n_rows = frame.len().min(config::PREVIEW_ROWS);
    grid(ui, "cohort_preview", frame, &frame.column_names, &(0..n_rows).collect::<Vec<_>>());
    if frame.len() > n_rows {
        ui.small(format!("Showing {n_rows} of {} rows", frame.len()));
    }
}

// ---------------------------------------------------------------------------
// Prediction table – ids + appended output columns
// ---------------------------------------------------------------------------

pub fn prediction_table(ui: &mut Ui, frame: &CohortFrame) {
    let columns: Vec<String> = config::ID_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain([
            config::PREDICTION_COLUMN.to_string(),
            config::PROBABILITY_COLUMN.to_string(),
        ])
        .collect();
    grid(ui, "prediction_table", frame, &columns, &(0..frame.len()).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// High-risk table – alert subset, probability colored by risk
// ---------------------------------------------------------------------------

pub fn high_risk_table(ui: &mut Ui, frame: &CohortFrame, rows: &[usize]) {
    let columns: Vec<String> = config::ID_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain([config::PROBABILITY_COLUMN.to_string()])
        .collect();
    grid(ui, "high_risk_table", frame, &columns, rows);
}

// ---------------------------------------------------------------------------
// Shared table rendering
// ---------------------------------------------------------------------------

fn grid(ui: &mut Ui, id: &str, frame: &CohortFrame, columns: &[String], rows: &[usize]) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(260.0)
            .columns(Column::auto().at_least(80.0), columns.len())
            .header(HEADER_HEIGHT, |mut header| {
                for name in columns {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let frame_row = rows[row.index()];
                    for name in columns {
                        row.col(|ui| {
                            cell(ui, frame, frame_row, name);
                        });
                    }
                });
            });
    });
}

fn cell(ui: &mut Ui, frame: &CohortFrame, row: usize, column: &str) {
    let Some(value) = frame.value(row, column) else {
        ui.weak("–");
        return;
    };
    let text = RichText::new(value.to_string());
    // probability cells carry the risk gradient
    if column == config::PROBABILITY_COLUMN {
        if let CellValue::Float(p) = value {
            ui.label(text.color(risk_color(*p)));
            return;
        }
    }
    ui.label(text);
}
