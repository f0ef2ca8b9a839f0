//! Top-level error type for service startup.
//!
//! Request handling has no failure path; everything here happens before the
//! server starts accepting connections (or when the listener itself fails).

use crate::config::ConfigError;
use crate::http::ServerError;
use crate::options::OptionListError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Options(#[from] OptionListError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
