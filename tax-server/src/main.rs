use clap::Parser;
use tracing::debug;

use tax_server::{ServerConfig, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    logging::init_logging(&config.log_level)?;
    debug!(?config, "loaded configuration");

    server::run(config).await
}
