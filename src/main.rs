//*** START FILE: src/main.rs ***//
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::{egui, NativeOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use agroscan_rust_gui::api::{AdvisoryBackend, HttpBackend, MockBackend};
use agroscan_rust_gui::config::{load_config_from_file, BackendKind, Config};
use agroscan_rust_gui::AgroScanApp;

#[derive(Parser, Debug)]
#[command(name = "agroscan", about = "Desktop client for the AgroScan crop advisory backend")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override `api_base_url` from the config file
    #[arg(long)]
    api_base: Option<String>,

    /// Use the offline mock backend instead of HTTP
    #[arg(long)]
    mock: bool,

    /// Override the default city used for weather lookups
    #[arg(long)]
    city: Option<String>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn build_backend(config: &Config) -> Arc<dyn AdvisoryBackend> {
    if config.backend == BackendKind::Http {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        match HttpBackend::new(&config.api_base_url, timeout, config.analyze_route) {
            Ok(backend) => {
                info!(base_url = %config.api_base_url, "using HTTP backend");
                return Arc::new(backend);
            }
            Err(e) => error!(error = %e, "cannot build HTTP backend, falling back to mock"),
        }
    }
    info!(latency_ms = config.mock.latency_ms, "using mock backend");
    Arc::new(MockBackend::new(Duration::from_millis(config.mock.latency_ms)))
}

fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();

    let (mut config, config_error) = match load_config_from_file(&args.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    if let Some(base) = args.api_base {
        config.api_base_url = base;
    }
    if let Some(city) = args.city {
        config.default_city = city;
    }
    if args.mock {
        config.backend = BackendKind::Mock;
    }

    init_tracing(&config.log_level);
    if let Some(err) = &config_error {
        warn!(path = %args.config.display(), "{}; continuing with defaults", err);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().thread_name("agroscan-io").build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start async runtime");
            std::process::exit(1);
        }
    };
    let backend = build_backend(&config);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AgroScan - Crop Disease Advisory",
        options,
        Box::new(move |cc| Box::new(AgroScanApp::new(cc, runtime, backend, &config, config_error))),
    )
}
//*** END FILE: src/main.rs ***//
