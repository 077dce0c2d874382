use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "relaynote")]
#[command(about = "Webhook-driven transcription notification relay", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print version information
    Version,
    /// Fetch the latest stored result from a running service
    Latest(ServiceCliArgs),
    /// Broadcast the stored result (or the given text) to all recipients
    Share(ShareCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ServiceCliArgs {
    /// Base URL of the running service
    #[arg(long, default_value = "http://127.0.0.1:10000")]
    pub url: String,
}

#[derive(ClapArgs, Debug)]
pub struct ShareCliArgs {
    /// Base URL of the running service
    #[arg(long, default_value = "http://127.0.0.1:10000")]
    pub url: String,

    /// Text to broadcast instead of the stored result
    #[arg(short, long)]
    pub text: Option<String>,
}
