use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::modules::devices::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "devsweep", version)]
#[command(about = "Find inactive devices on a device-management server and remove them")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Clone, Default)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "DEVSWEEP_URL", help = "Base URL of the API server")]
    pub url: Option<String>,
    #[arg(long, global = true, env = crate::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,
    #[arg(long, global = true, help = "Read the API token from a file (takes precedence)")]
    pub token_file: Option<PathBuf>,
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<u32>,
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        help = "Per-request timeout in seconds, 0 disables it"
    )]
    pub timeout: Option<u64>,
    #[arg(
        long,
        global = true,
        value_enum,
        help = "Device field used in disable/delete calls"
    )]
    pub identifier: Option<IdentifierArg>,
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(long, global = true, help = "Accept invalid TLS certificates")]
    pub insecure: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// List matching devices without changing anything
    View(SelectArgs),
    /// List matching devices, ask for confirmation, then disable and delete them
    Delete(SelectArgs),
}
