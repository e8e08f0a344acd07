mod actions;
pub(crate) mod args;
mod confirm;
pub(crate) mod http;
mod report;

pub(crate) use actions::{handle_delete, handle_view};
pub(crate) use http::HttpDeviceApi;
