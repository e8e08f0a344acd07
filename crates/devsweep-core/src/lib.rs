#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod constants;
pub mod criteria;
pub mod error;
pub mod fetch;
pub mod inactivity;
pub mod models;
pub mod pipeline;
pub mod purge;

pub use crate::api::*;
pub use crate::constants::*;
pub use crate::criteria::*;
pub use crate::error::*;
pub use crate::fetch::*;
pub use crate::inactivity::*;
pub use crate::models::*;
pub use crate::pipeline::*;
pub use crate::purge::*;
