//! Keystore error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("Unfamiliar output from the key generator: {0}")]
    UnrecognizedOutput(String),

    #[error("Key file not found after creating account {0}")]
    KeyFileNotFound(String),

    #[error("Corrupt keystore entry {path}: {reason}")]
    CorruptKeystoreEntry { path: PathBuf, reason: String },

    #[error("Key generator not found: {0}. Please install geth or set CATENA_GETH")]
    GeneratorNotFound(PathBuf),

    #[error("Key generator failed: {0}")]
    GeneratorFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeystoreError>;
