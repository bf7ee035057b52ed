//! Shared runtime helpers: logging setup and data directory preparation.

pub mod utils;
pub mod env;
