use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::config;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Central panel – preview before a run, full dashboard after
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(frame) = &state.cohort else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load sample data, or File → Open cohort…");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let Some(report) = &state.report else {
                ui.heading("Cohort preview");
                table::cohort_preview(ui, frame);
                return;
            };

            ui.heading("Predictions");
            table::prediction_table(ui, frame);
            ui.add_space(12.0);

            ui.heading("Evaluation metrics");
            if let Ok(json) = serde_json::to_string_pretty(&report.metrics) {
                ui.monospace(json);
            }
            plot::metrics_chart(ui, &report.metrics);
            ui.add_space(12.0);

            ui.heading("ROC curve");
            plot::roc_plot(ui, &report.roc, report.metrics.auc_roc);
            ui.add_space(12.0);

            if !report.high_risk.is_empty() {
                ui.label(
                    RichText::new(format!(
                        "Alert: {} patients above {:.0}% predicted mortality risk",
                        report.high_risk.len(),
                        config::HIGH_RISK_THRESHOLD * 100.0
                    ))
                    .color(Color32::from_rgb(230, 150, 0))
                    .strong(),
                );
                table::high_risk_table(ui, frame, &report.high_risk);
            }
        });
}
