//! Errors at the collaborator boundary (dataset and config files).
//!
//! Layout, camera, interaction and rendering never fail: degenerate input
//! degrades to an empty or simplified scene instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarfieldError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StarfieldError>;
