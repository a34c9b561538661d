use std::f32::consts::TAU;

use eframe::egui::{Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points, Text};

use crate::color::generate_palette;
use crate::data::aggregate::AggregateResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rural / urban bar chart
// ---------------------------------------------------------------------------

/// Bar labels and heights in display order.
pub fn area_bars(result: &AggregateResult) -> [(&'static str, u64); 4] {
    [
        ("Rural Main Workers", result.main.rural),
        ("Urban Main Workers", result.main.urban),
        ("Rural Marginal Workers", result.marginal.rural),
        ("Urban Marginal Workers", result.marginal.urban),
    ]
}

/// Main vs marginal workers, split by rural and urban.
pub fn area_bar_chart(ui: &mut Ui, result: &AggregateResult) {
    let bars = area_bars(result);
    let colors = generate_palette(bars.len());

    Plot::new("area_bar_chart")
        .legend(Legend::default())
        .x_axis_label("Worker Type")
        .y_axis_label("Number of Workers")
        .show_x(false)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .height(260.0)
        .show(ui, |plot_ui| {
            for (i, ((label, value), color)) in bars.iter().zip(colors).enumerate() {
                let chart = BarChart::new(vec![Bar::new(i as f64, *value as f64).width(0.6)])
                    .name(*label)
                    .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Gender pie chart
// ---------------------------------------------------------------------------

/// Slice labels and values in display order.
pub fn gender_slices(result: &AggregateResult) -> [(&'static str, u64); 4] {
    let g = &result.gender;
    [
        ("Main Males", g.main_male),
        ("Main Females", g.main_female),
        ("Marginal Males", g.marginal_male),
        ("Marginal Females", g.marginal_female),
    ]
}

/// Start and end angle (radians, clockwise from 12 o'clock) of each slice.
/// Returns an empty list when every value is zero.
pub fn slice_angles(values: &[u64]) -> Vec<(f32, f32)> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0_f32;
    values
        .iter()
        .map(|&v| {
            let end = start + TAU * (v as f64 / total as f64) as f32;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Gender distribution of main and marginal workers.
pub fn gender_pie_chart(ui: &mut Ui, result: &AggregateResult) {
    let slices = gender_slices(result);
    let values: Vec<u64> = slices.iter().map(|(_, v)| *v).collect();
    let angles = slice_angles(&values);
    let total: u64 = values.iter().sum();

    if angles.is_empty() {
        ui.label("No gender data for this selection.");
        return;
    }

    let colors = generate_palette(slices.len());

    ui.horizontal(|ui: &mut Ui| {
        let size = 220.0;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        for (&(start, end), &color) in angles.iter().zip(colors.iter()) {
            // Triangle fan so that slices wider than half a turn still fill.
            let steps = ((end - start) / TAU * 96.0).ceil().max(1.0) as usize;
            for s in 0..steps {
                let a0 = start + (end - start) * s as f32 / steps as f32;
                let a1 = start + (end - start) * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, rim(center, radius, a0), rim(center, radius, a1)],
                    color,
                    Stroke::NONE,
                ));
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, value), color) in slices.iter().zip(colors) {
                let share = *value as f64 / total as f64 * 100.0;
                ui.label(RichText::new(format!("■ {label}: {value} ({share:.1}%)")).color(color));
            }
        });
    });
}

fn rim(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

// ---------------------------------------------------------------------------
// District map
// ---------------------------------------------------------------------------

/// Districts of the current result placed by the configured geocoder.
/// Districts without coordinates are listed below the plot.
pub fn district_map(ui: &mut Ui, state: &AppState) {
    let Some(selection) = &state.selection else {
        return;
    };
    let result = &state.result;

    let largest = result
        .by_district
        .iter()
        .map(|d| d.main + d.marginal)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut placed = Vec::new();
    let mut unplaced = Vec::new();
    for d in &result.by_district {
        match state.geocoder.locate(&selection.region, &d.district) {
            Some(point) => placed.push((d, point)),
            None => unplaced.push(d.district.as_str()),
        }
    }

    if placed.is_empty() {
        ui.label("No coordinates available for these districts.");
    } else {
        Plot::new("district_map")
            .legend(Legend::default())
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .height(320.0)
            .show(ui, |plot_ui| {
                for (d, point) in &placed {
                    let workers = d.main + d.marginal;
                    let radius = 3.0 + 12.0 * (workers as f32 / largest as f32).sqrt();
                    let color = state.district_colors.color_for(&d.district);
                    plot_ui.points(
                        Points::new(vec![[point.longitude, point.latitude]])
                            .radius(radius)
                            .color(color)
                            .name(format!(
                                "{}: {} Main Workers, {} Marginal Workers",
                                d.district, d.main, d.marginal
                            )),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(point.longitude, point.latitude),
                            d.district.as_str(),
                        )
                        .color(Color32::WHITE),
                    );
                }
            });
    }

    if !unplaced.is_empty() {
        ui.label(
            RichText::new(format!("Without coordinates: {}", unplaced.join(", ")))
                .weak(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::GenderTotals;

    #[test]
    fn slices_cover_full_turn() {
        let angles = slice_angles(&[1, 1, 2, 0]);
        assert_eq!(angles.len(), 4);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[1].1 - TAU / 2.0).abs() < 1e-5);
        assert!((angles[3].1 - TAU).abs() < 1e-5);
        // Zero-valued slice is empty.
        assert_eq!(angles[3].0, angles[3].1);
    }

    #[test]
    fn all_zero_has_no_slices() {
        assert!(slice_angles(&[0, 0, 0, 0]).is_empty());
    }

    #[test]
    fn chart_series_follow_result() {
        let result = AggregateResult {
            gender: GenderTotals {
                main_male: 1,
                main_female: 2,
                marginal_male: 3,
                marginal_female: 4,
            },
            ..Default::default()
        };
        let values: Vec<u64> = gender_slices(&result).iter().map(|s| s.1).collect();
        assert_eq!(values, [1, 2, 3, 4]);
        assert_eq!(area_bars(&result)[0].0, "Rural Main Workers");
    }
}
