use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{PRICE_CEILING, PRICE_MIN};
use crate::data::model::IncomeBracket;
use crate::state::AppState;
use crate::ui::usd_whole;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the category list so we can mutate state inside the loop.
    let categories: Vec<String> = dataset.categories.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Location type (multi-select) ----
            ui.strong("Location Type");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_categories();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_categories();
                }
            });
            for cat in &categories {
                let mut checked = state.criteria.categories.contains(cat);
                if ui.checkbox(&mut checked, cat).changed() {
                    state.toggle_category(cat);
                }
            }
            ui.separator();

            // ---- Income level (single-select) ----
            ui.strong("Income Level");
            let mut bracket = state.criteria.bracket;
            for b in IncomeBracket::ALL {
                ui.radio_value(&mut bracket, b, b.label());
            }
            if bracket != state.criteria.bracket {
                state.set_bracket(bracket);
            }
            ui.separator();

            // ---- Price range ----
            ui.strong("Median House Price");
            let mut lo = state.criteria.price_min;
            let mut hi = state.criteria.price_max;
            let mut changed = false;
            changed |= ui
                .add(
                    egui::Slider::new(&mut lo, PRICE_MIN..=PRICE_CEILING)
                        .step_by(1000.0)
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut hi, PRICE_MIN..=PRICE_CEILING)
                        .step_by(1000.0)
                        .text("max"),
                )
                .changed();
            if changed {
                state.criteria.price_min = lo;
                state.criteria.price_max = hi;
                state.refilter();
            }
            ui.separator();

            // ---- Active filter summary ----
            ui.strong("Current Filters");
            ui.label(format!(
                "Price Range: {} – {}",
                usd_whole(state.criteria.price_min),
                usd_whole(state.criteria.price_max)
            ));
            let selected = if state.criteria.categories.is_empty() {
                "(none)".to_string()
            } else {
                state
                    .criteria
                    .categories
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            ui.label(format!("Location Types: {selected}"));
            ui.label(format!("Income Level: {}", state.criteria.bracket));
            ui.label(format!(
                "Filtered Records: {}",
                state.visible_indices.len()
            ));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("California Housing Data (1990)");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} of {} records match",
                state.visible_indices.len(),
                ds.len()
            ));
        }

        if let Some(err) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(err).color(Color32::RED));
        }
    });
}
