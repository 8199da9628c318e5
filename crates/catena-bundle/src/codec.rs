//! Bundle export and import

use crate::error::{BundleError, Result};
use crate::manifest::{BOOTNODES_FILE, Bundle, CHAIN_CONFIG_FILE, ChainManifest, GENESIS_FILE};
use crate::scripts::{ScriptOptions, render_scripts};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes and reads bundle directories
pub struct BundleCodec {
    options: ScriptOptions,
}

impl BundleCodec {
    pub fn new(options: ScriptOptions) -> Self {
        Self { options }
    }

    /// Fail with [`BundleError::PathAlreadyExists`] if `destination` exists
    pub fn check_destination(destination: &Path) -> Result<()> {
        if destination.exists() {
            return Err(BundleError::PathAlreadyExists(destination.to_path_buf()));
        }
        Ok(())
    }

    /// Write `bundle` for the blockchain `name` into the new directory
    /// `destination`. Returns the paths of the written files.
    pub async fn export(&self, name: &str, bundle: &Bundle, destination: &Path) -> Result<Vec<PathBuf>> {
        Self::check_destination(destination)?;

        // Render before touching the filesystem so a template error leaves nothing behind
        let scripts = render_scripts(&self.options, name, bundle)?;

        fs::create_dir(destination).await.map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => BundleError::PathAlreadyExists(destination.to_path_buf()),
            _ => BundleError::Io(e),
        })?;

        let mut written = Vec::new();

        for (file_name, content) in [
            (GENESIS_FILE, serde_json::to_string(&bundle.genesis)?),
            (BOOTNODES_FILE, serde_json::to_string(&bundle.external_bootnodes)?),
            (CHAIN_CONFIG_FILE, serde_json::to_string(&bundle.chain_config)?),
        ] {
            let path = destination.join(file_name);
            fs::write(&path, content).await?;
            written.push(path);
        }

        for script in scripts {
            let path = destination.join(script.file_name);
            fs::write(&path, script.content).await?;
            make_executable(&path).await?;
            written.push(path);
        }

        tracing::info!(
            blockchain = %name,
            destination = %destination.display(),
            bootnodes = bundle.external_bootnodes.len(),
            "Exported bundle"
        );
        Ok(written)
    }

    /// Read a bundle directory. Fails without a partial result if any of
    /// the JSON artifacts is missing or malformed.
    pub async fn import(&self, source: &Path) -> Result<Bundle> {
        let genesis = read_artifact(source, GENESIS_FILE).await?;
        let external_bootnodes = read_artifact(source, BOOTNODES_FILE).await?;
        let chain_config: ChainManifest = read_artifact(source, CHAIN_CONFIG_FILE).await?;

        tracing::info!(
            source = %source.display(),
            backend = %chain_config.backend,
            "Imported bundle"
        );
        Ok(Bundle {
            genesis,
            external_bootnodes,
            chain_config,
        })
    }
}

async fn read_artifact<T: DeserializeOwned>(dir: &Path, artifact: &str) -> Result<T> {
    let path = dir.join(artifact);
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(BundleError::MissingArtifact {
                artifact: artifact.to_string(),
                dir: dir.to_path_buf(),
            });
        }
        Err(e) => return Err(BundleError::Io(e)),
    };

    serde_json::from_str(&content).map_err(|source| BundleError::MalformedArtifact {
        artifact: artifact.to_string(),
        source,
    })
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
