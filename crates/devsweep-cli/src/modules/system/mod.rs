pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod http;
pub(crate) mod types;

pub(crate) use config::{load_config, resolve_run_config};
pub(crate) use types::{CommandContext, FileConfig, RunConfig, RunStatus};
