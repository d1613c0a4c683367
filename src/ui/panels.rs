use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config;
use crate::state::{AppState, StatusLevel};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open cohort…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(frame) = &state.cohort {
            ui.label(format!("{} patients loaded", frame.len()));
            if let Some(report) = &state.report {
                ui.label(format!("{} high-risk", report.high_risk.len()));
            }
            ui.separator();
        }

        if let Some(status) = &state.status {
            let color = match status.level {
                StatusLevel::Success => Color32::from_rgb(40, 160, 60),
                StatusLevel::Error => Color32::RED,
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the control panel: data loading, predictor selection, model
/// status, predict action.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sepsis Sentinel");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Data ----
            ui.strong("Data");
            if ui.button("Load sample data").clicked() {
                state.load_sample_data();
            }
            ui.separator();

            // ---- Predictor selection ----
            let n_selected = state.selected_predictors.len();
            let n_total = config::PREDICTORS.len();
            ui.strong(format!("Predictors  ({n_selected}/{n_total})"));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_predictors();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_predictors();
                }
            });

            for name in config::PREDICTORS {
                let mut checked = state.selected_predictors.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    state.toggle_predictor(name);
                }
            }
            ui.separator();

            // ---- Model ----
            ui.strong("Model");
            match (&state.bundle, &state.bundle_error) {
                (Some(bundle), _) => {
                    ui.label(format!(
                        "{} trees over {} features",
                        bundle.model.trees.len(),
                        bundle.scaler.n_features()
                    ));
                }
                (None, Some(reason)) => {
                    ui.label(RichText::new(reason).color(Color32::RED));
                }
                (None, None) => {
                    ui.label("Not loaded");
                }
            }
            ui.separator();

            // ---- Predict ----
            if ui.button("Predict").clicked() {
                state.run_prediction();
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cohort data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_cohort_file(&path);
    }
}
