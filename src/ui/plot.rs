use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::color::distinct_colors;
use crate::metrics::{EvalMetrics, RocCurve};

// ---------------------------------------------------------------------------
// Metrics bar chart
// ---------------------------------------------------------------------------

/// Four bars, one per evaluation metric, named in the legend.
pub fn metrics_chart(ui: &mut Ui, metrics: &EvalMetrics) {
    let named = metrics.named();
    let colors = distinct_colors(named.len());

    Plot::new("metrics_chart")
        .height(220.0)
        .legend(Legend::default())
        .include_y(0.0)
        .include_y(1.05)
        .y_axis_label("Score")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (&(name, value), &color)) in named.iter().zip(&colors).enumerate() {
                let bar = Bar::new(i as f64, value).name(name).fill(color).width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(name).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// ROC curve
// ---------------------------------------------------------------------------

/// ROC curve with a dashed diagonal as the random baseline.
pub fn roc_plot(ui: &mut Ui, roc: &RocCurve, auc: f64) {
    let curve: PlotPoints = roc.points.iter().copied().collect();
    let diagonal: PlotPoints = vec![[0.0, 0.0], [1.0, 1.0]].into_iter().collect();

    Plot::new("roc_plot")
        .height(260.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .x_axis_label("False Positive Rate")
        .y_axis_label("True Positive Rate")
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .include_y(1.05)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(curve)
                    .name(format!("ROC curve (AUC = {auc:.2})"))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(diagonal)
                    .name("Random")
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_loose()),
            );
        });
}
