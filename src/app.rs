use std::sync::Arc;

use eframe::egui;
use launch_dash::data::model::LaunchDataset;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    pub title: String,
}

impl LaunchDashApp {
    pub fn new(dataset: Arc<LaunchDataset>, title: String) -> Self {
        Self {
            state: AppState::new(dataset),
            title,
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.title);
        });

        // ---- Left side panel: site and payload controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    plot::pie_chart(ui, &self.state);
                    ui.separator();
                    plot::scatter_chart(ui, &self.state);
                    if self.state.show_points {
                        ui.separator();
                        plot::points_table(ui, &self.state);
                    }
                });
        });
    }
}
