//! Bundle error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Path already exists: {0}")]
    PathAlreadyExists(PathBuf),

    #[error("Bundle is missing {artifact} (looked in {dir})")]
    MissingArtifact { artifact: String, dir: PathBuf },

    #[error("Malformed {artifact}: {source}")]
    MalformedArtifact {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Script template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BundleError>;
