use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SweepError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("device {device}: cannot parse last_online {value:?}")]
    TimestampParse { device: String, value: String },
}

impl SweepError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }
}

/// A failed disable or delete call. Never fatal for the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", render_mutation_error(.status, .message))]
pub struct MutationError {
    pub status: Option<u16>,
    pub message: String,
}

impl MutationError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

fn render_mutation_error(status: &Option<u16>, message: &str) -> String {
    match (status, message.trim()) {
        (Some(status), "") => format!("HTTP {status}"),
        (Some(status), body) => format!("HTTP {status}: {body}"),
        (None, message) => message.to_string(),
    }
}
