mod app;
mod color;
mod data;
mod state;
mod ui;

use app::CasaviewApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // One load per session; AppState owns the dataset from here on. If both
    // sources fail the app starts into a visible "data unavailable" screen.
    let state = AppState::from_load(data::loader::load_dataset());
    if let Some(err) = &state.load_error {
        log::error!("{err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "California Housing Data (1990)",
        options,
        Box::new(move |_cc| Ok(Box::new(CasaviewApp::new(state)))),
    )
}
