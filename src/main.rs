use anyhow::{Context, Result};
use clap::Parser;
use resume_builder::app_log;
use resume_builder::core::ConfigManager;
use resume_builder::form_cli::{handle_form_command, production_controller, FormCli};
use std::fs::OpenOptions;
use std::process::ExitCode;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = FormCli::parse();
    let config = ConfigManager::load()?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file {}", config.log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    app_log!(info, "Generation origin: {}", config.service.origin);
    app_log!(info, "Data: {}", config.storage.data_dir.display());
    app_log!(info, "Downloads: {}", config.storage.downloads_dir.display());

    let controller = production_controller(&config)?;
    let succeeded = handle_form_command(cli, &controller).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
