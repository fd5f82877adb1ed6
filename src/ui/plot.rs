use std::collections::BTreeMap;
use std::f64::consts::PI;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};
use launch_dash::color::generate_palette;

use crate::state::AppState;
use crate::ui::to_color32;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Wedge outline from `start` to `end` radians on the unit circle. Wedges are
/// cut into pieces of at most a quarter turn so every polygon stays convex.
fn wedge_pieces(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = ((end - start) / (PI / 2.0)).ceil().max(1.0) as usize;
    let step = (end - start) / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start + step * p as f64;
            let a1 = a0 + step;
            let segments = 16;
            std::iter::once([0.0, 0.0])
                .chain((0..=segments).map(|i| {
                    let a = a0 + (a1 - a0) * i as f64 / segments as f64;
                    [a.cos(), a.sin()]
                }))
                .collect()
        })
        .collect()
}

/// Render the outcome pie chart.
pub fn pie_chart(ui: &mut Ui, state: &AppState) {
    ui.heading(&state.pie_title);

    let total = state.pie.total();
    if total == 0 {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let colors = generate_palette(state.pie.len());

    Plot::new("pie_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            // Start at 12 o'clock and go clockwise.
            let mut angle = PI / 2.0;
            for (slice, color) in state.pie.slices().iter().zip(colors.iter()) {
                if slice.count == 0 {
                    continue;
                }
                let name = format!("{} ({})", slice.label, slice.count);
                let sweep = slice.count as f64 / total as f64 * 2.0 * PI;
                let (start, end) = (angle - sweep, angle);

                for piece in wedge_pieces(start, end) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(piece))
                            .name(&name)
                            .fill_color(to_color32(*color))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = (start + end) / 2.0;
                let pct = slice.count as f64 / total as f64 * 100.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{pct:.1}%")).color(Color32::BLACK),
                ));

                angle = start;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload (x) vs. outcome flag (y), one series per booster category.
pub fn scatter_chart(ui: &mut Ui, state: &AppState) {
    ui.heading(&state.scatter_title);

    if state.points.is_empty() {
        ui.label(RichText::new("No launches in the selected range").weak());
    }

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &state.points {
        series
            .entry(p.booster_version_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.outcome.flag())]);
    }

    let bounds = state.dataset.payload_bounds();

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(bounds.low)
        .include_x(bounds.high)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, pts) in series {
                let color = to_color32(state.booster_colors.color_for(category));
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(category)
                        .color(color)
                        .radius(4.0)
                        .shape(MarkerShape::Circle),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Points table
// ---------------------------------------------------------------------------

/// Tabular view of the scatter chart input.
pub fn points_table(ui: &mut Ui, state: &AppState) {
    ui.strong(format!("{} launches", state.points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("class");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, state.points.len(), |mut row| {
                let p = &state.points[row.index()];
                row.col(|ui| {
                    ui.label(&p.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(p.outcome.flag().to_string());
                });
                row.col(|ui| {
                    ui.colored_label(
                        to_color32(state.booster_colors.color_for(&p.booster_version_category)),
                        &p.booster_version_category,
                    );
                });
            });
        });
}
