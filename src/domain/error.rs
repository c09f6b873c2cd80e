//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("script name must not contain path separators: {0}")]
    InvalidScriptName(String),

    #[error("script name must not be empty")]
    EmptyScriptName,

    #[error("unknown script: {0}")]
    UnknownScript(String),

    #[error("manifest is not a JSON object: {0}")]
    InvalidManifest(PathBuf),
}
