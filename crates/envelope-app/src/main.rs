mod app;
mod cli;
mod playback;
mod render;

use std::path::Path;
use std::sync::Arc;

use envelope_common::ConfigError;
use envelope_config::EnvelopeConfig;
use envelope_core::{FileFlagStore, FlagStore, MemoryFlagStore};
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "envelope=info";

fn load_config(path: Option<&str>) -> Result<EnvelopeConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = envelope_config::load_from_path(Path::new(path))?;
            envelope_config::validation::validate(&config)?;
            Ok(config)
        }
        None => envelope_config::load_config(),
    }
}

fn flag_store(ephemeral: bool) -> Arc<dyn FlagStore> {
    if ephemeral {
        tracing::info!("Tracking flag kept in memory");
        return Arc::new(MemoryFlagStore::new());
    }
    match FileFlagStore::default_dir() {
        Some(dir) => {
            let store = FileFlagStore::new(dir);
            tracing::info!("Tracking flag stored under {}", store.dir().display());
            Arc::new(store)
        }
        None => {
            tracing::warn!("No data directory available, tracking flag kept in memory");
            Arc::new(MemoryFlagStore::new())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();

    // Logging depends on the config, so report load failures after init.
    let loaded = load_config(args.config.as_deref());
    let log_directive = match (&args.log_level, &loaded) {
        (Some(directive), _) => directive.as_str(),
        (None, Ok(config)) => config.logging.level.directive(),
        (None, Err(_)) => FALLBACK_DIRECTIVE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| FALLBACK_DIRECTIVE.parse().unwrap()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Envelope v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        EnvelopeConfig::default()
    });

    if args.print_config {
        println!("{}", envelope_config::config_to_json(&config));
        return;
    }

    let store = flag_store(args.ephemeral);
    let app = match app::EnvelopeApp::new(config, store) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
