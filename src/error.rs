//! Render Errors
//! Failures surfaced by chart validation, drawing and file output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to write {}: {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Render backend error: {0}")]
    Backend(String),
}

impl RenderError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RenderError::InvalidConfig(msg.into())
    }

    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        RenderError::Backend(err.to_string())
    }
}
