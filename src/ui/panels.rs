use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use well_log_cleaner::data::model::WellLog;
use well_log_cleaner::processing::Filter;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – pipeline editor and curve selection
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            file_list(ui, state);
            ui.separator();

            ui.heading("Processing");
            ui.label(RichText::new(&state.settings_name).weak());
            ui.separator();

            for (i, spec) in state.specs.iter_mut().enumerate() {
                let kind = spec.kind();
                let mut header = RichText::new(kind.label()).strong();
                if !spec.enabled {
                    header = header.weak();
                }

                egui::CollapsingHeader::new(header)
                    .id_salt(("filter", i))
                    .default_open(spec.enabled)
                    .show(ui, |ui: &mut Ui| {
                        ui.checkbox(&mut spec.enabled, "Enabled");
                        ui.add_enabled_ui(spec.enabled, |ui: &mut Ui| {
                            filter_params(ui, &mut spec.filter);
                        });
                    });
            }

            ui.add_space(4.0);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Save settings").clicked() {
                    let result = state.save_settings();
                    state.report(result);
                }
                if ui.button("Reset").clicked() {
                    let result = state.reset_settings();
                    state.report(result);
                }
            });

            ui.separator();
            curve_selection(ui, state);
        });
}

/// Opened logs: click one to view it, ✕ to close it.
fn file_list(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Files");
    if state.files.is_empty() {
        ui.label("No file loaded.");
        return;
    }

    let mut select = None;
    let mut remove = None;
    for (i, file) in state.files.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            if ui
                .small_button("✕")
                .on_hover_text("Close this file")
                .clicked()
            {
                remove = Some(i);
            }
            let name = if file.processed.is_some() {
                format!("{} ✔", file.log.file_name)
            } else {
                file.log.file_name.clone()
            };
            if ui
                .selectable_label(state.current == Some(i), name)
                .clicked()
            {
                select = Some(i);
            }
        });
    }

    if let Some(i) = remove {
        state.remove_file(i);
    } else if let Some(i) = select {
        state.set_current(i);
    }

    if let Some(log) = state.current_log() {
        well_info(ui, log);
    }
}

/// Header mnemonics shown in the well information block.
const WELL_INFO_FIELDS: [(&str, &str); 10] = [
    ("WELL", "Well"),
    ("COMP", "Company"),
    ("FLD", "Field"),
    ("LOC", "Location"),
    ("SRVC", "Service company"),
    ("DATE", "Date"),
    ("STRT", "Start depth"),
    ("STOP", "Stop depth"),
    ("STEP", "Step"),
    ("NULL", "Null value"),
];

fn well_info(ui: &mut Ui, log: &WellLog) {
    egui::CollapsingHeader::new("Well information")
        .id_salt(("well_info", &log.file_name))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new(("well_info_grid", &log.file_name))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (mnemonic, label) in WELL_INFO_FIELDS {
                        ui.label(RichText::new(label).weak());
                        ui.label(header_text(log, mnemonic));
                        ui.end_row();
                    }
                });
        });
}

/// Header value with its unit, or "–" when the header is missing or blank.
fn header_text(log: &WellLog, mnemonic: &str) -> String {
    match log.header(mnemonic) {
        Some(item) if !item.value.is_empty() => match item.unit.as_str() {
            "" => item.value.clone(),
            unit => format!("{} {unit}", item.value),
        },
        _ => "–".to_string(),
    }
}

/// Parameter sliders for one stage. Ranges follow the usual working
/// ranges of each filter.
fn filter_params(ui: &mut Ui, filter: &mut Filter) {
    match filter {
        Filter::MedianFilter { window_size } => {
            window_slider(ui, window_size);
        }
        Filter::MovingAverage {
            window_size,
            preserve_edges,
        } => {
            window_slider(ui, window_size);
            ui.checkbox(preserve_edges, "Preserve edges");
        }
        Filter::LowPassFilter { cutoff_frequency } => {
            ui.add(
                Slider::new(cutoff_frequency, 0.01..=0.5)
                    .step_by(0.01)
                    .text("Cutoff frequency"),
            );
        }
        Filter::Despike {
            threshold,
            window_size,
        } => {
            ui.add(Slider::new(threshold, 1.0..=10.0).step_by(0.1).text("Threshold (MADs)"));
            window_slider(ui, window_size);
        }
        Filter::WaveletDenoising { threshold, level } => {
            ui.add(Slider::new(threshold, 0.0..=1.0).step_by(0.05).text("Threshold"));
            ui.add(Slider::new(level, 1..=5).text("Level"));
        }
        Filter::AdaptiveFilter {
            sensitivity,
            window_size,
        } => {
            ui.add(Slider::new(sensitivity, 0.0..=1.0).step_by(0.05).text("Sensitivity"));
            window_slider(ui, window_size);
        }
    }
}

fn window_slider(ui: &mut Ui, window_size: &mut usize) {
    ui.add(Slider::new(window_size, 3..=21).step_by(2.0).text("Window size"));
}

fn curve_selection(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Curves");

    let names: Vec<String> = match state.current_log() {
        Some(log) => log.curves.iter().map(|c| c.name.clone()).collect(),
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_curves();
        }
        if ui.small_button("None").clicked() {
            state.select_no_curves();
        }
        ui.label(format!("{}/{}", state.selection.len(), names.len()));
    });

    for name in &names {
        let mut checked = state.selection.contains(name);
        let text = RichText::new(name).color(state.colors.color_for(name));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_curve(name);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let has_processed = state.current_processed().is_some();
            if ui
                .add_enabled(has_processed, egui::Button::new("Export processed…"))
                .clicked()
            {
                if let Some(path) = save_file_dialog(state, "cleaned") {
                    let result = state.export_processed(&path);
                    state.report(result);
                }
                ui.close_menu();
            }
            let has_original = state.current_log().is_some();
            if ui
                .add_enabled(has_original, egui::Button::new("Export original…"))
                .clicked()
            {
                if let Some(path) = save_file_dialog(state, "original") {
                    let result = state.export_original(&path);
                    state.report(result);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(log) = state.current_log() {
            ui.label(format!(
                "{}  –  well {}  –  {} curves, {} rows",
                log.file_name,
                log.well_name(),
                log.curves.len(),
                log.len()
            ));
            ui.separator();
        }

        if ui
            .add_enabled(state.current_log().is_some(), egui::Button::new("▶ Process"))
            .clicked()
        {
            let result = state.process();
            state.report(result);
        }

        if let Some(msg) = &state.status_message {
            let color = if state.status_is_error {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open well logs")
        .add_filter("Supported files", &["las", "LAS", "csv", "txt"])
        .add_filter("LAS", &["las", "LAS"])
        .add_filter("CSV", &["csv", "txt"])
        .pick_files();

    for path in files.unwrap_or_default() {
        let result = state.open_file(&path);
        state.report(result);
    }
}

fn save_file_dialog(state: &AppState, suffix: &str) -> Option<PathBuf> {
    let stem = state
        .current_log()
        .map(|log| log.file_name.as_str())
        .and_then(|name| std::path::Path::new(name).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("well");

    rfd::FileDialog::new()
        .set_title("Export well log")
        .set_file_name(format!("{stem}_{suffix}.las"))
        .add_filter("LAS", &["las"])
        .add_filter("CSV", &["csv"])
        .save_file()
}
