//! Configuration error types

use campus_rbac::{ParseCapabilityError, ParseRoleError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid capability override: {0}")]
    UnknownCapability(#[from] ParseCapabilityError),

    #[error("Invalid role in capability override: {0}")]
    UnknownRole(#[from] ParseRoleError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("XDG directory error: {0}")]
    XdgError(String),
}
