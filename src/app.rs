use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorkforceApp {
    pub state: AppState,
}

impl WorkforceApp {
    /// Build the app and open whatever the configuration points at.
    ///
    /// The data file goes first: a successful load clears the status line,
    /// and a coordinate error reported after it must stay visible.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::default();
        if let Some(path) = &config.data.path {
            state.load_path(path);
        }
        if let Some(path) = &config.data.coordinates {
            state.load_coordinates(path);
        }
        Self { state }
    }
}

impl eframe::App for WorkforceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: counts, charts, map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state);
        });
    }
}
