use dcmspec_explorer_core::config::{self, LogLevel};
use dcmspec_explorer_gui::{ExplorerApp, GuiError, GuiResult};
use eframe::egui::ViewportBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::from(level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_target(false);

    // A second init (e.g. under a test harness) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() -> GuiResult<()> {
    let config_load = config::load();
    init_tracing(config_load.config.log_level);

    tracing::info!("Starting DCMspec Explorer...");
    tracing::info!("Logging configured: level={}", config_load.config.log_level);
    tracing::info!("Config file: {}", config_load.source);
    tracing::info!("Cache directory: {}", config_load.config.cache_dir.display());
    for warning in &config_load.warnings {
        tracing::warn!("{warning}");
    }

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("DCMspec Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "DCMspec Explorer",
        native_options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, config_load)))),
    )
    .map_err(|e| GuiError::Ui(format!("Application failed: {e}")))
}
