//! Error types
//!
//! `CommandError` covers per-line conditions that are reported and skipped.
//! `Error` covers conditions that end the run.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::{ShooterId, Side};

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to format document: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Recoverable errors raised while interpreting a single line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing argument <{name}>")]
    MissingArgument {
        command: &'static str,
        name: &'static str,
    },

    #[error("{command}: invalid <{name}> value '{value}'")]
    InvalidNumber {
        command: &'static str,
        name: &'static str,
        value: String,
    },

    #[error("invalid side '{0}' (expected 'e' or 'd')")]
    InvalidSide(String),

    #[error("invalid annotation flag '{0}' (expected 'v' or 'i')")]
    InvalidAnnotation(String),

    #[error("shooter with id {0} not found")]
    UnknownShooter(ShooterId),

    #[error("shooter with id {0} already exists")]
    DuplicateShooter(ShooterId),

    #[error("shooter {shooter} has no {side} loader attached")]
    Unattached { shooter: ShooterId, side: Side },
}
