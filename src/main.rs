use eframe::egui;
use nursery_map::app::NurseryMapApp;
use nursery_map::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!(
        "Dataset: {}, store: {}",
        config.dataset_path.display(),
        config.store_path.display()
    );
    let app = NurseryMapApp::new(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nursery Map – Availability",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
