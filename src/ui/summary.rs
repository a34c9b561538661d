use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::AggregateResult;
use crate::data::filter::FilterSelection;

// ---------------------------------------------------------------------------
// Headline counts
// ---------------------------------------------------------------------------

/// Six labelled totals for the selection.
pub fn worker_counts(ui: &mut Ui, selection: &FilterSelection, result: &AggregateResult) {
    let region = &selection.region;
    let rows = [
        (format!("Total Workers in {region}:"), result.main.total),
        ("Rural Workers:".to_string(), result.main.rural),
        ("Urban Workers:".to_string(), result.main.urban),
        (format!("Marginal Workers in {region}:"), result.marginal.total),
        ("Rural Marginal Workers:".to_string(), result.marginal.rural),
        ("Urban Marginal Workers:".to_string(), result.marginal.urban),
    ];
    for (label, value) in rows {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(label);
            ui.label(value.to_string());
        });
    }
}

/// Notice shown above the counts when no record matches the selection.
pub fn no_match_notice(selection: &FilterSelection, result: &AggregateResult) -> Option<String> {
    result.is_empty().then(|| {
        format!(
            "No records for {} in {}; all counts are zero.",
            selection.category, selection.region
        )
    })
}

// ---------------------------------------------------------------------------
// District table
// ---------------------------------------------------------------------------

pub fn district_table(ui: &mut Ui, result: &AggregateResult) {
    if result.is_empty() {
        ui.label("No districts match this selection.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("district_table")
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("District");
            });
            header.col(|ui| {
                ui.strong("Main Workers");
            });
            header.col(|ui| {
                ui.strong("Marginal Workers");
            });
        })
        .body(|mut body| {
            for d in &result.by_district {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&d.district);
                    });
                    row.col(|ui| {
                        ui.label(d.main.to_string());
                    });
                    row.col(|ui| {
                        ui.label(d.marginal.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// The three "key facts" sentences for a selection.
pub fn insights(selection: &FilterSelection, result: &AggregateResult) -> [String; 3] {
    let FilterSelection { region, category } = selection;
    let g = &result.gender;
    [
        format!(
            "1. The {category} industry in {region} employs {} main workers and {} marginal workers in total.",
            result.main.total, result.marginal.total
        ),
        format!(
            "2. The majority of main workers are {} based, while the majority of marginal workers are {} based.",
            result.main_majority().label(),
            result.marginal_majority().label()
        ),
        format!(
            "3. Gender distribution shows {} main male workers and {} marginal male workers, \
             and {} main female workers and {} marginal female workers.",
            g.main_male, g.marginal_male, g.main_female, g.marginal_female
        ),
    ]
}

pub fn insights_section(ui: &mut Ui, selection: &FilterSelection, result: &AggregateResult) {
    for line in insights(selection, result) {
        ui.label(RichText::new(line));
    }
}
