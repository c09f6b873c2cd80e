//! Infrastructure-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// The running executable's location could not be determined.
    #[error("cannot locate package root: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("no package root above {0}")]
    RootlessExe(PathBuf),
}
