//! Rusty-TxList: a Rust-native wallet transaction list with gas/time estimates

use eframe::egui;

mod app;
mod sidebar;
mod ui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Rusty-TxList");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rusty-TxList")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([360.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty-TxList",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)?))),
    )
}
