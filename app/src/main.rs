use std::io;

use articulos_app::{Config, Shell, UreqTransport};
use articulos_core::{ArticuloController, ArticulosClient};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they never interleave with the rendered page.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    info!(base_url = %config.base_url, "starting articulos client");
    let controller = ArticuloController::new(ArticulosClient::new(&config.base_url));
    let mut shell = Shell::new(controller, UreqTransport::new());
    shell.run(io::stdin().lock(), io::stdout().lock())
}
