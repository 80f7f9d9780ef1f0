use anyhow::Context;
use clap::Parser;
use fv1_cli::Cli;
use fv1_cli::Runner;
use fv1_cli::logging::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.into_config()?;
    info!("URL of the board: {}", config.base_url);
    info!("Starting watcher in directory {}", config.directory.display());

    let runner = Runner::new(config).context("failed to create DevRemote client")?;
    runner
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("watcher stopped with an error")?;

    Ok(())
}
