use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WellLogCleanerApp {
    pub state: AppState,
}

impl WellLogCleanerApp {
    pub fn new() -> Self {
        Self {
            state: AppState::load(),
        }
    }
}

impl eframe::App for WellLogCleanerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: pipeline + curves ----
        egui::SidePanel::left("pipeline_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: before/after summary ----
        egui::TopBottomPanel::bottom("summary_panel")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                ui.strong("Processing results");
                egui::ScrollArea::both().show(ui, |ui| {
                    plot::summary_table(ui, &self.state);
                });
            });

        // ---- Central panel: curve plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::curve_plots(ui, &self.state);
        });
    }
}
