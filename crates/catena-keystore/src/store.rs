//! Keystore directory management

use crate::error::{KeystoreError, Result};
use crate::geth::{KeyGenerator, parse_address};
use catena_core::Account;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

const SCRATCH_PREFIX: &str = "pw-";

/// Local account store backed by a key generator
pub struct Keystore {
    keys_dir: PathBuf,
    tmp_dir: PathBuf,
    generator: Box<dyn KeyGenerator>,
}

impl Keystore {
    pub fn new(
        keys_dir: impl Into<PathBuf>,
        tmp_dir: impl Into<PathBuf>,
        generator: impl KeyGenerator + 'static,
    ) -> Self {
        Self {
            keys_dir: keys_dir.into(),
            tmp_dir: tmp_dir.into(),
            generator: Box::new(generator),
        }
    }

    pub fn keys_dir(&self) -> &Path {
        &self.keys_dir
    }

    /// Create the key and scratch directories if missing
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.keys_dir, &self.tmp_dir] {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
                tracing::debug!("Created keystore directory: {}", dir.display());
            }
        }
        Ok(())
    }

    /// Create a new account protected by `password`.
    ///
    /// Returns the account address and the path of its key file. The password
    /// is handed to the generator through a scratch file that is unique to
    /// this call and removed before this function returns.
    pub async fn create_account(&self, password: &str) -> Result<(String, PathBuf)> {
        let output = {
            let scratch = self.write_scratch_password(password)?;
            tracing::debug!("Wrote scratch password file: {}", scratch.path().display());
            self.generator.generate(scratch.path(), &self.keys_dir).await
        }?;

        let address = parse_address(&output)?;

        let keyfile = self
            .find_keyfile(&address)
            .await?
            .ok_or_else(|| KeystoreError::KeyFileNotFound(address.clone()))?;

        tracing::info!(address = %address, keyfile = %keyfile.display(), "Created account");
        Ok((address, keyfile))
    }

    /// Look up an account by address. `None` if no key file matches.
    pub async fn get_account(&self, address: &str) -> Result<Option<Account>> {
        let Some(keyfile) = self.find_keyfile(address).await? else {
            tracing::debug!("No key file for address {}", address);
            return Ok(None);
        };

        let raw = read_entry(&keyfile).await?;
        Ok(Some(Account {
            address: address.to_string(),
            keyfile_path: keyfile,
            raw,
        }))
    }

    /// Addresses of all accounts in the keystore, sorted.
    ///
    /// Entries that are not valid key files are skipped with a warning.
    pub async fn list_addresses(&self) -> Result<Vec<String>> {
        let mut addresses = Vec::new();

        for path in self.entries().await? {
            let entry = match read_entry(&path).await {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping keystore entry: {}", e);
                    continue;
                }
            };

            match entry.get("address").and_then(Value::as_str) {
                Some(address) => addresses.push(address.to_string()),
                None => tracing::warn!(
                    "Skipping keystore entry without address: {}",
                    path.display()
                ),
            }
        }

        addresses.sort();
        Ok(addresses)
    }

    /// Find the key file whose name ends with `address`
    async fn find_keyfile(&self, address: &str) -> Result<Option<PathBuf>> {
        let address = address.trim().to_ascii_lowercase();
        if address.is_empty() {
            return Ok(None);
        }

        Ok(self.entries().await?.into_iter().find(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(&address))
                .unwrap_or(false)
        }))
    }

    /// Regular files in the keystore directory, sorted by name
    async fn entries(&self) -> Result<Vec<PathBuf>> {
        if !self.keys_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut dir = fs::read_dir(&self.keys_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn write_scratch_password(&self, password: &str) -> Result<tempfile::NamedTempFile> {
        let mut scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempfile_in(&self.tmp_dir)?;
        scratch.write_all(password.as_bytes())?;
        scratch.flush()?;
        Ok(scratch)
    }
}

async fn read_entry(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|e| KeystoreError::CorruptKeystoreEntry {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
