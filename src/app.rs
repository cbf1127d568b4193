use eframe::egui::{self, Color32, RichText};

use crate::config::AppConfig;
use crate::data::loader;
use crate::state::{NurseryState, ViewUpdate};
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::ui::map;
use crate::ui::panels::{self, InfoPanel};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub enum NurseryMapApp {
    /// Dataset loaded; the map is interactive.
    Ready {
        state: NurseryState,
        panel: InfoPanel,
    },
    /// The dataset could not be read. Nothing else is reachable.
    LoadFailed { message: String },
}

impl NurseryMapApp {
    /// Load the dataset and favorites store described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        let dataset = match loader::load_file(&config.dataset_path) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Failed to load nursery data: {e}");
                return NurseryMapApp::LoadFailed {
                    message: e.to_string(),
                };
            }
        };

        let store: Box<dyn KeyValueStore> = match JsonFileStore::open(&config.store_path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("Favorites will not persist: {e}");
                Box::new(MemoryStore::new())
            }
        };

        NurseryMapApp::Ready {
            state: NurseryState::new(dataset, store),
            panel: InfoPanel::default(),
        }
    }
}

impl eframe::App for NurseryMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (state, panel) = match self {
            NurseryMapApp::Ready { state, panel } => (state, panel),
            NurseryMapApp::LoadFailed { message } => {
                load_failed_notice(ctx, message);
                return;
            }
        };

        let mut updates = Vec::new();

        // ---- Top panel: counts and favorites toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state, panel);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                updates.push(panels::side_panel(ui, state));
            });

        // ---- Right side panel: details / favorites ----
        egui::SidePanel::right("info_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                updates.push(panels::info_panel(ui, state, *panel));
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            updates.push(map::nursery_map(ui, state));
        });

        // Selecting a record from the map or the favorites list opens its details.
        if updates.iter().any(|u| u.details) {
            *panel = InfoPanel::Details;
        }
        if updates.iter().any(|u: &ViewUpdate| !u.is_empty()) {
            ctx.request_repaint();
        }
    }
}

/// Blocking notice shown when the dataset could not be loaded.
fn load_failed_notice(ctx: &egui::Context, message: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to load nursery data.");
                ui.label("Please reload the application.");
                ui.add_space(8.0);
                ui.label(RichText::new(message).color(Color32::RED));
            });
        });
    });
}
