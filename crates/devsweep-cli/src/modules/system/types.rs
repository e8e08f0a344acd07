use std::process::ExitCode;
use std::time::Duration;

use devsweep_core::{DeviceApi, IdentifierField};
use serde::Deserialize;

use super::args::OutputFormat;
use crate::EXIT_PURGE_FAILURES;

/// Optional defaults read from `~/.devsweep/config.json`.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub identifier: Option<IdentifierField>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Settings for a single invocation, after flags, environment and the
/// config file have been merged.
#[derive(Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub token: String,
    pub page_size: u32,
    pub timeout: Option<Duration>,
    pub identifier: IdentifierField,
    pub format: OutputFormat,
    pub insecure: bool,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .field("identifier", &self.identifier)
            .field("format", &self.format)
            .field("insecure", &self.insecure)
            .finish_non_exhaustive()
    }
}

pub struct CommandContext<'a> {
    pub api: &'a dyn DeviceApi,
    pub config: &'a RunConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    NothingToDo,
    Declined,
    PurgeFailures,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Completed | Self::NothingToDo | Self::Declined => ExitCode::SUCCESS,
            Self::PurgeFailures => ExitCode::from(EXIT_PURGE_FAILURES),
        }
    }
}
