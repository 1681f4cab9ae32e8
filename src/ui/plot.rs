use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use well_log_cleaner::data::model::WellLog;
use well_log_cleaner::data::nulls::is_null;
use well_log_cleaner::data::selection::selected_indices;

use crate::color::ORIGINAL_COLOR;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Curve plots (central panel)
// ---------------------------------------------------------------------------

/// One plot per selected curve, depth on the x axis, original and
/// processed overlaid. Depth axes are linked so zoom and pan stay in step.
pub fn curve_plots(ui: &mut Ui, state: &AppState) {
    let log = match state.current_log() {
        Some(log) => log,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a LAS file to view curves  (File → Open…)");
            });
            return;
        }
    };

    let indices = selected_indices(log, &state.selection);
    if indices.is_empty() {
        ui.label("No curves selected.");
        return;
    }

    let depth_label = match log.depth_curve.unit.as_str() {
        "" => log.depth_curve.name.clone(),
        unit => format!("{} ({unit})", log.depth_curve.name),
    };
    let link_group = egui::Id::new("depth_axis");

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for idx in indices {
                let curve = &log.curves[idx];
                let color = state.colors.color_for(&curve.name);

                ui.strong(match curve.unit.as_str() {
                    "" => curve.name.clone(),
                    unit => format!("{} [{unit}]", curve.name),
                });

                Plot::new(("curve_plot", &log.file_name, &curve.name))
                    .height(PLOT_HEIGHT)
                    .legend(Legend::default())
                    .x_axis_label(depth_label.as_str())
                    .link_axis(link_group, [true, false])
                    .allow_boxed_zoom(true)
                    .allow_drag(true)
                    .allow_scroll(true)
                    .allow_zoom(true)
                    .show(ui, |plot_ui| {
                        for segment in segments(log, idx) {
                            plot_ui.line(
                                Line::new(PlotPoints::from(segment))
                                    .name("original")
                                    .color(ORIGINAL_COLOR)
                                    .width(1.0),
                            );
                        }
                        if let Some(processed) = state.current_processed() {
                            for segment in segments(processed, idx) {
                                plot_ui.line(
                                    Line::new(PlotPoints::from(segment))
                                        .name("processed")
                                        .color(color)
                                        .width(1.5),
                                );
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });
}

/// Contiguous runs of valid `[depth, value]` points of curve `idx`.
/// Null samples break the line instead of being drawn.
pub fn segments(log: &WellLog, idx: usize) -> Vec<Vec<[f64; 2]>> {
    let mut out: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current = Vec::new();
    let null_value = log.null_value();

    for (&depth, &value) in log.depth.iter().zip(&log.values[idx]) {
        if is_null(value, null_value) || !depth.is_finite() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push([depth, value]);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

// ---------------------------------------------------------------------------
// Summary table (bottom panel)
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let summaries = state.current_summaries();
    if summaries.is_empty() {
        ui.label("Press Process to compare original and cleaned curves.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(90.0), 7)
        .header(20.0, |mut header| {
            for title in [
                "Curve",
                "Min",
                "Max",
                "Mean (before)",
                "Mean (after)",
                "Std dev (before)",
                "Std dev (after)",
                "Noise reduction",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for s in summaries {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(s.name.as_str());
                    });
                    for value in [
                        s.before.min,
                        s.before.max,
                        s.before.mean,
                        s.after.mean,
                        s.before.std_dev,
                        s.after.std_dev,
                    ] {
                        row.col(|ui| {
                            ui.monospace(format!("{value:.3}"));
                        });
                    }
                    row.col(|ui| {
                        let text = match s.noise_reduction() {
                            Some(pct) => format!("{pct:.1}%"),
                            None => "–".to_string(),
                        };
                        ui.monospace(text);
                    });
                });
            }
        });
}
