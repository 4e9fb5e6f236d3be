//! Command handlers grouped by concern.

pub(crate) mod conf;
pub(crate) mod server;
