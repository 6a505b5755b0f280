use clap::Parser;
use roster_console::cli::{Cli, run};
use roster_console::{ConsoleConfig, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.apply_overrides(ConsoleConfig::from_env());
    let _log_guard = logger::init_logger(cli.verbose, config.log_dir.as_deref());

    tracing::debug!(command = ?cli.command, "Starting roster");
    run(cli, config).await
}
