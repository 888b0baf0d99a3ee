use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staybook::cli::{run_command, Cli};
use staybook::config::Config;
use staybook::Gateway;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
    }
    if let Some(session_file) = &cli.session_file {
        config.session.path = session_file.clone();
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        api = %config.api.base_url,
        session = %config.session.path.display(),
        "Starting staybook v{}",
        env!("CARGO_PKG_VERSION")
    );

    let gateway = Gateway::from_config(&config)?;
    run_command(&cli, &gateway).await
}
