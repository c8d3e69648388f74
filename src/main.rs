use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use healthvisor::{
    drain, wait_for_shutdown_signal, CheckerRegistry, Config, LogSink, Scheduler,
    SchedulerConfig, Sink,
};

/// Periodically probes configured endpoints and logs their health.
#[derive(Parser)]
#[command(name = "healthvisor", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short = 'f', long = "file", default_value = "healthvisor.toml")]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load(&cli.file)
        .with_context(|| format!("loading config from {}", cli.file.display()))?;
    info!(
        path = %cli.file.display(),
        endpoints = config.endpoints.len(),
        "configuration loaded"
    );

    let registry = Arc::new(CheckerRegistry::with_defaults());
    let scheduler = Scheduler::new(config.endpoints, registry, SchedulerConfig::default());
    let (handle, reports) = scheduler.start();

    let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(LogSink)];
    let consumer = tokio::spawn(drain(reports, sinks));

    wait_for_shutdown_signal()
        .await
        .context("installing signal handlers")?;
    info!("shutdown signal received");

    handle.shutdown().await?;
    // All senders are gone; the consumer exits once the queue is drained.
    consumer.await.context("joining report consumer")?;

    info!("bye");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
