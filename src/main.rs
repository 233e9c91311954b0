use anyhow::Context as _;
use eframe::NativeOptions;
use portfolio_chat::config::Config;
use portfolio_chat::gui::PortfolioApp;
use portfolio_chat::logger;

fn main() -> anyhow::Result<()> {
    logger::init();
    log::info!("🚀 Portfolio started");

    // Runtime for resolution tasks; entered for the whole GUI lifetime.
    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let _guard = rt.enter();

    let config = Config::from_env()?;
    log::info!("📁 Configuration loaded");
    let title = format!("{} · CV", config.owner_name);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Box::new(PortfolioApp::new(config, &cc.egui_ctx)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI terminated with an error: {e}"))
}
