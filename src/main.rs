use anyhow::Result;
use clap::Parser;
use relaynote::{
    app,
    cli::{handle_latest_command, handle_share_command, Cli, CliCommand},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Relaynote {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Latest(args)) => {
            handle_latest_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Share(args)) => {
            handle_share_command(args).await?;
            return Ok(());
        }
        None => {}
    }

    app::run_service().await
}
