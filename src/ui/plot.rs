use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, LineStyle, Plot, PlotBounds, PlotPoints, Points, VLine};

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{usd_cents, usd_whole};

// Fixed map zoom: half-spans around the filtered view's mean coordinate,
// sized to keep all of California in frame.
const MAP_HALF_SPAN_LON: f64 = 5.5;
const MAP_HALF_SPAN_LAT: f64 = 4.5;

const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Central panel – metrics, map, histogram, raw table
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(format!("Data unavailable\n{err}")).color(Color32::RED));
        });
        return;
    }

    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Loading dataset…");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics_row(ui, state);
            ui.separator();

            ui.heading("Housing Data Map");
            map_plot(ui, state, dataset);
            ui.add_space(8.0);

            ui.heading("Median House Value Distribution");
            histogram_plot(ui, state);
            ui.add_space(8.0);

            egui::CollapsingHeader::new("View Raw Data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    raw_table(ui, state, dataset);
                });

            ui.separator();
            ui.label("Data Source: California Housing Data (1990)");
        });
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, state: &AppState) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Records", state.visible_indices.len().to_string());
        match &state.stats {
            Some(stats) => {
                metric(&mut cols[1], "Average Price", usd_whole(stats.mean_price));
                metric(&mut cols[2], "Average Income", usd_cents(stats.mean_income));
            }
            None => {
                // Empty view: neutral placeholders, never NaN.
                metric(&mut cols[1], "Average Price", "–".to_string());
                metric(&mut cols[2], "Average Income", "–".to_string());
            }
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Geospatial scatter
// ---------------------------------------------------------------------------

fn map_plot(ui: &mut Ui, state: &AppState, dataset: &Dataset) {
    let Some(stats) = &state.stats else {
        ui.label("No records match the current filters.");
        return;
    };

    // One series per category so the legend doubles as a colour key.
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in &state.visible_indices {
        let r = &dataset.records[i];
        by_category
            .entry(r.ocean_proximity.as_str())
            .or_default()
            .push([r.longitude, r.latitude]);
    }

    let response = Plot::new("housing_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .height(360.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Fixed zoom, recentered on the view's mean coordinate.
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [
                    stats.mean_longitude - MAP_HALF_SPAN_LON,
                    stats.mean_latitude - MAP_HALF_SPAN_LAT,
                ],
                [
                    stats.mean_longitude + MAP_HALF_SPAN_LON,
                    stats.mean_latitude + MAP_HALF_SPAN_LAT,
                ],
            ));

            for (category, points) in by_category {
                let color = state
                    .colors
                    .as_ref()
                    .map(|c| c.color_for(category))
                    .unwrap_or(Color32::LIGHT_RED);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(color)
                        .radius(2.0),
                );
            }

            hovered_record(plot_ui, state, dataset)
        });

    if let Some(i) = response.inner {
        let r = &dataset.records[i];
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new("map_tooltip"),
            |ui: &mut Ui| {
                ui.label(format!("Median Value: {}", usd_whole(r.median_house_value)));
                ui.label(format!("Income: {}", usd_cents(r.median_income)));
                ui.label(format!("Location: {}", r.ocean_proximity));
            },
        );
    }
}

/// Nearest visible record to the cursor, within a small data-space radius.
fn hovered_record(
    plot_ui: &egui_plot::PlotUi,
    state: &AppState,
    dataset: &Dataset,
) -> Option<usize> {
    let pointer = plot_ui.pointer_coordinate()?;
    let tolerance = plot_ui.plot_bounds().width() / 80.0;

    let mut best: Option<(usize, f64)> = None;
    for &i in &state.visible_indices {
        let r = &dataset.records[i];
        let dist = (r.longitude - pointer.x).hypot(r.latitude - pointer.y);
        if dist <= tolerance && best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Value-distribution histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, state: &AppState) {
    let (Some(hist), Some(stats)) = (&state.histogram, &state.stats) else {
        ui.label("No records match the current filters.");
        return;
    };

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bar::new(hist.center(i), count as f64).width(hist.bin_width * 0.95))
        .collect();

    Plot::new("value_distribution")
        .legend(Legend::default())
        .x_axis_label("Median House Value ($)")
        .y_axis_label("Frequency")
        .height(300.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(STEEL_BLUE).name("Frequency"));
            plot_ui.vline(
                VLine::new(stats.mean_price)
                    .color(Color32::RED)
                    .style(LineStyle::dashed_loose())
                    .name(format!("Mean: {}", usd_whole(stats.mean_price))),
            );
            plot_ui.vline(
                VLine::new(stats.median_price)
                    .color(Color32::GREEN)
                    .style(LineStyle::dashed_loose())
                    .name(format!("Median: {}", usd_whole(stats.median_price))),
            );
        });
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

const TABLE_COLUMNS: [&str; 10] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
    "ocean_proximity",
];

fn raw_table(ui: &mut Ui, state: &AppState, dataset: &Dataset) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), TABLE_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in TABLE_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let r = &dataset.records[state.visible_indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", r.longitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", r.latitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_cell(r.housing_median_age));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_cell(r.total_rooms));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_cell(r.total_bedrooms));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_cell(r.population));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_cell(r.households));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.4}", r.median_income));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", r.median_house_value));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.ocean_proximity.as_str());
                });
            });
        });
}

fn opt_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.0}")).unwrap_or_default()
}
