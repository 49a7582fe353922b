//! Headless skirmish driver.
mod config;
mod skirmish;

use std::path::Path;

use anyhow::Result;
use config::SimConfig;
use skirmish::Skirmish;
use tactics_content::{ConfigLoader, ContentCatalog, ContentFactory};
use tactics_core::TacticsConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let tactics = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => TacticsConfig::default(),
    };
    let catalog = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir).load_catalog()?,
        None => ContentCatalog::builtin()?,
    };

    tracing::info!(
        "starting skirmish: {}x{} board, {} turns",
        config.grid_width,
        config.grid_height,
        config.turns
    );

    let mut skirmish = Skirmish::new(&config, &tactics, catalog)?;
    let report = skirmish.run(config.turns);

    match report.winner {
        Some(team) => tracing::info!("{} wins after {} turns", team, report.turns_played),
        None => tracing::info!("no winner after {} turns", report.turns_played),
    }
    for unit in &report.survivors {
        tracing::info!(
            "survivor {} ({}) at {} with {} health",
            unit.id,
            unit.name,
            unit.position,
            unit.health
        );
    }
    tracing::info!(
        "{} unit(s) defeated, {} unit events published",
        report.defeats,
        report.events_published
    );

    Ok(())
}

/// Setup logging to stderr, and to `sim.log` when a log directory is given.
///
/// The returned guard must stay alive for the file writer to flush.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // RUST_LOG overrides the INFO default
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/sim.log", dir.display());
    }

    Ok(guard)
}
