use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{plot, summary};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (dataset, selection) = match (&state.dataset, &state.selection) {
        (Some(ds), Some(sel)) => (ds, sel),
        _ => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut chosen_region = selection.region.clone();
    let mut chosen_category = selection.category.clone();

    ui.strong("Select State");
    egui::ComboBox::from_id_salt("select_state")
        .selected_text(&chosen_region)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for region in dataset.distinct_regions() {
                ui.selectable_value(&mut chosen_region, region.clone(), region);
            }
        });
    ui.add_space(8.0);

    ui.strong("Select Industry (NIC Name)");
    egui::ComboBox::from_id_salt("select_industry")
        .selected_text(&chosen_category)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(400.0).show(ui, |ui: &mut Ui| {
                for category in dataset.distinct_categories() {
                    ui.selectable_value(&mut chosen_category, category.clone(), category);
                }
            });
        });

    // Recompute only for the field that actually changed.
    state.select_region(&chosen_region);
    state.select_category(&chosen_category);
}

// ---------------------------------------------------------------------------
// Central panel – counts, charts, map, insights
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(selection) = &state.selection else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a workforce table to begin  (File → Open…)");
        });
        return;
    };
    let result = &state.result;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Industrial Human Resource Management").size(26.0));
            ui.heading(format!(
                "Industrial Human Resource Management in {}",
                selection.region
            ));
            ui.label(RichText::new(format!("Industry: {}", selection.category)).strong());
            ui.separator();

            if let Some(notice) = summary::no_match_notice(selection, result) {
                ui.label(RichText::new(notice).italics());
            }
            summary::worker_counts(ui, selection, result);
            ui.separator();

            ui.strong(format!(
                "Main vs Marginal Workers in {} ({})",
                selection.region, selection.category
            ));
            plot::area_bar_chart(ui, result);
            ui.separator();

            ui.strong(format!(
                "Gender Distribution for Main vs Marginal Workers in {} ({})",
                selection.region, selection.category
            ));
            plot::gender_pie_chart(ui, result);
            ui.separator();

            ui.heading(format!("Worker Distribution by District in {}", selection.region));
            summary::district_table(ui, result);
            ui.add_space(8.0);
            plot::district_map(ui, state);
            ui.separator();

            ui.heading("Insights and Key Facts");
            summary::insights_section(ui, selection, result);
        });
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
            if ui.button("District coordinates…").clicked() {
                open_coordinates_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching",
                ds.len(),
                state.result.record_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open workforce table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn open_coordinates_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open district coordinates")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_coordinates(&path);
    }
}
