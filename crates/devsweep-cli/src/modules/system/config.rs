use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use devsweep_core::{SweepError, DEFAULT_PAGE_SIZE};

use super::types::{FileConfig, RunConfig};
use crate::cli_args::GlobalArgs;
use crate::{DEFAULT_TIMEOUT_SECS, DEFAULT_URL, TOKEN_ENV};

fn config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(Path::new(&home).join(".devsweep").join("config.json"))
}

/// Reads the optional config file; a missing file or unset `HOME` yields
/// the defaults.
pub(crate) fn load_config() -> Result<FileConfig, SweepError> {
    let Some(path) = config_path() else {
        return Ok(FileConfig::default());
    };
    load_config_from(&path)
}

pub(crate) fn load_config_from(path: &Path) -> Result<FileConfig, SweepError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| {
        SweepError::configuration(format!("reading {}: {err}", path.display()))
    })?;
    serde_json::from_str(&contents)
        .map_err(|err| SweepError::configuration(format!("parsing {}: {err}", path.display())))
}

/// Merges flags (and their environment fallbacks) over the config file and
/// built-in defaults.
pub(crate) fn resolve_run_config(
    args: &GlobalArgs,
    file: FileConfig,
) -> Result<RunConfig, SweepError> {
    let raw_url = args
        .url
        .clone()
        .or(file.url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let base_url = normalize_base_url(&raw_url)?;

    let token = match args.token_file.as_deref() {
        Some(path) => read_token_file(path)?,
        None => args
            .token
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    };
    if token.is_empty() {
        return Err(SweepError::configuration(format!(
            "API token is required; set {TOKEN_ENV} or pass --token/--token-file"
        )));
    }

    let page_size = args
        .page_size
        .or(file.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(SweepError::configuration("page size must be at least 1"));
    }

    let timeout_secs = args
        .timeout
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    Ok(RunConfig {
        base_url,
        token,
        page_size,
        timeout,
        identifier: args
            .identifier
            .map(Into::into)
            .or(file.identifier)
            .unwrap_or_default(),
        format: args.format.or(file.format).unwrap_or_default(),
        insecure: args.insecure,
    })
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, SweepError> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SweepError::configuration(format!(
            "base URL must start with http:// or https://, got {raw:?}"
        )));
    }
    Ok(url.to_string())
}

fn read_token_file(path: &Path) -> Result<String, SweepError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        SweepError::configuration(format!("reading token file {}: {err}", path.display()))
    })?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(SweepError::configuration(format!(
            "token file is empty: {}",
            path.display()
        )));
    }
    Ok(token.to_string())
}
