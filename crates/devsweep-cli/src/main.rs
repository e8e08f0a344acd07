use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::devices::HttpDeviceApi;
use crate::modules::system::{load_config, resolve_run_config, CommandContext, RunConfig};
use devsweep_core::SweepError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_URL: &str = "http://127.0.0.1:21114";
pub(crate) const TOKEN_ENV: &str = "RUSTDESK_TOKEN";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) const EXIT_FAILURE: u8 = 1;
pub(crate) const EXIT_CONFIGURATION: u8 = 3;
pub(crate) const EXIT_FETCH: u8 = 4;
pub(crate) const EXIT_TIMESTAMP: u8 = 5;
pub(crate) const EXIT_PURGE_FAILURES: u8 = 6;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.global.verbose) {
        eprintln!("error: {err:#}");
        return ExitCode::from(EXIT_FAILURE);
    }
    match run(cli).await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<crate::modules::system::RunStatus> {
    let file_config = load_config()?;
    let config = resolve_run_config(&cli.global, file_config)?;
    debug!(config = ?config, "resolved configuration");

    let client = build_client(&config)?;
    let api = HttpDeviceApi::new(client, &config);
    let ctx = CommandContext {
        api: &api,
        config: &config,
    };
    handle_command(cli.command, &ctx).await
}

fn build_client(config: &RunConfig) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .danger_accept_invalid_certs(config.insecure)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(concat!("devsweep/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub(crate) fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SweepError>() {
        Some(SweepError::Configuration(_)) => EXIT_CONFIGURATION,
        Some(SweepError::Fetch(_)) => EXIT_FETCH,
        Some(SweepError::TimestampParse { .. }) => EXIT_TIMESTAMP,
        None => EXIT_FAILURE,
    }
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
