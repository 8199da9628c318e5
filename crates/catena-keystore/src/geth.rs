//! geth key generation wrapper
//!
//! Wraps `geth account new` for account creation.

use crate::error::{KeystoreError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const ADDRESS_PREFIX: &str = "Address: {";
const ADDRESS_SUFFIX: &str = "}";
const ADDRESS_HEX_LEN: usize = 40;

/// Creates a key file for a new account
#[async_trait]
pub trait KeyGenerator: Send + Sync {
    /// Generate a key protected by the password stored in `password_file`,
    /// writing the key file into `keystore_dir`. Returns the generator's
    /// standard output.
    async fn generate(&self, password_file: &Path, keystore_dir: &Path) -> Result<String>;
}

/// geth CLI wrapper
pub struct Geth {
    binary: PathBuf,
}

impl Geth {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl KeyGenerator for Geth {
    async fn generate(&self, password_file: &Path, keystore_dir: &Path) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["account", "new", "--password"])
            .arg(password_file)
            .arg("--keystore")
            .arg(keystore_dir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(
            "Running: {} account new --keystore {}",
            self.binary.display(),
            keystore_dir.display()
        );

        let output = cmd.output().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeystoreError::GeneratorNotFound(self.binary.clone()),
            _ => KeystoreError::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeystoreError::GeneratorFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Extract the account address from key generator output.
///
/// The address is on the second-to-last line (the output ends with a
/// newline) and reads `Address: {<40 hex chars>}`.
pub fn parse_address(output: &str) -> Result<String> {
    let unrecognized = || KeystoreError::UnrecognizedOutput(output.trim().to_string());

    let line = output
        .split('\n')
        .rev()
        .nth(1)
        .map(|line| line.trim_end_matches('\r'))
        .ok_or_else(unrecognized)?;

    let address = line
        .strip_prefix(ADDRESS_PREFIX)
        .and_then(|rest| rest.strip_suffix(ADDRESS_SUFFIX))
        .ok_or_else(unrecognized)?;

    if address.len() != ADDRESS_HEX_LEN || !address.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(unrecognized());
    }

    Ok(address.to_string())
}
