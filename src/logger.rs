//! Logging setup: writes to logs/portfolio-chat.log, or stderr when the file
//! cannot be opened.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "logs/portfolio-chat.log";

pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Info);
        // Dependencies are far too chatty at info.
        for noisy in ["eframe", "egui", "egui_glow", "wgpu", "reqwest", "hyper", "hyper_util"] {
            builder.filter_module(noisy, LevelFilter::Warn);
        }
    }

    // [HH:MM:SS LEVEL] target - message
    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if !Path::new(LOG_DIR).exists() {
        let _ = std::fs::create_dir_all(LOG_DIR);
    }

    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Could not open {}: {}, logging to stderr", LOG_FILE, e);
            builder.target(env_logger::Target::Stderr);
        }
    }

    if builder.try_init().is_ok() {
        log::info!("Logging initialised ✓");
    }
}
