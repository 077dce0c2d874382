//! CLI commands for talking to a running service.

pub mod args;
pub mod client;

pub use args::{Cli, CliCommand, ServiceCliArgs, ShareCliArgs};

use anyhow::Result;
use client::RelayClient;

pub async fn handle_latest_command(args: ServiceCliArgs) -> Result<()> {
    let client = RelayClient::new(args.url);
    let body = client.latest().await?;
    println!("{}", body);
    Ok(())
}

pub async fn handle_share_command(args: ShareCliArgs) -> Result<()> {
    let client = RelayClient::new(args.url);
    let body = client.share(args.text).await?;
    println!("{}", body);
    Ok(())
}
