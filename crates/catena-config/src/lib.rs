//! Catena configuration
//!
//! Values are resolved in this order, later sources winning:
//! 1. Built-in defaults
//! 2. `<home>/config.yaml`
//! 3. Environment variables `CATENA_ENDPOINT`, `CATENA_HOME`, `CATENA_GETH`
//! 4. Command line flags
//!
//! The home directory defaults to `~/.catena`. Key files live in
//! `<home>/keys`, scratch files in `<home>/tmp`.

pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Registry endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:1989";

/// Key generation binary used when nothing else is configured
pub const DEFAULT_GETH: &str = "geth";

/// Node data root written into exported scripts (expanded by the shell)
pub const DEFAULT_NODE_DATA_ROOT: &str = "$HOME/.catena/ethereum";

pub const CONFIG_FILE: &str = "config.yaml";
pub const LOG_FILE: &str = "catena.log";

const HOME_DIR_NAME: &str = ".catena";
const KEYS_DIR: &str = "keys";
const TMP_DIR: &str = "tmp";

pub const ENV_ENDPOINT: &str = "CATENA_ENDPOINT";
pub const ENV_HOME: &str = "CATENA_HOME";
pub const ENV_GETH: &str = "CATENA_GETH";

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CatenaConfig {
    /// Base URL of the resource registry
    pub endpoint: String,

    /// Catena home directory
    pub home: PathBuf,

    /// Key generation binary
    pub geth: PathBuf,

    /// Root of node data directories referenced by exported scripts
    pub node_data_root: String,

    /// Whether exported bundles include the GUI client script
    pub gui_client_script: bool,
}

/// Optional settings read from `<home>/config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub geth: Option<PathBuf>,
    pub node_data_root: Option<String>,
    pub gui_client_script: Option<bool>,
}

impl FileConfig {
    /// Read the config file. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found: {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::InvalidFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings supplied by the environment or the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub home: Option<PathBuf>,
    pub geth: Option<PathBuf>,
}

impl Overrides {
    /// Read `CATENA_ENDPOINT`, `CATENA_HOME` and `CATENA_GETH`. Empty values are ignored.
    pub fn from_env() -> Self {
        fn var(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|v| !v.trim().is_empty())
        }

        Self {
            endpoint: var(ENV_ENDPOINT),
            home: var(ENV_HOME).map(PathBuf::from),
            geth: var(ENV_GETH).map(PathBuf::from),
        }
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: Overrides) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            home: other.home.or(self.home),
            geth: other.geth.or(self.geth),
        }
    }
}

/// Default home directory (`~/.catena`)
pub fn default_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or(ConfigError::HomeDirNotFound)
}

impl CatenaConfig {
    /// Resolve the configuration from all sources. `cli` holds the command
    /// line flags and takes precedence over the environment.
    pub fn load(cli: Overrides) -> Result<Self> {
        let overrides = Overrides::from_env().merge(cli);
        let home = match overrides.home.clone() {
            Some(home) => home,
            None => default_home()?,
        };

        let file = FileConfig::read(&home.join(CONFIG_FILE))?;
        let config = Self::resolve(home, file, overrides);
        config.validate()?;

        tracing::debug!(
            endpoint = %config.endpoint,
            home = %config.home.display(),
            "Resolved configuration"
        );
        Ok(config)
    }

    /// Combine the file settings and overrides for a known home directory
    pub fn resolve(home: PathBuf, file: FileConfig, overrides: Overrides) -> Self {
        Self {
            endpoint: overrides
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            home,
            geth: overrides
                .geth
                .or(file.geth)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GETH)),
            node_data_root: file
                .node_data_root
                .unwrap_or_else(|| DEFAULT_NODE_DATA_ROOT.to_string()),
            gui_client_script: file.gui_client_script.unwrap_or(true),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "endpoint".to_string(),
                value: self.endpoint.clone(),
            });
        }
        if self.node_data_root.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "node_data_root".to_string(),
                value: self.node_data_root.clone(),
            });
        }
        Ok(())
    }

    /// Directory holding one key file per account
    pub fn keys_dir(&self) -> PathBuf {
        self.home.join(KEYS_DIR)
    }

    /// Directory for short-lived scratch files
    pub fn tmp_dir(&self) -> PathBuf {
        self.home.join(TMP_DIR)
    }

    pub fn log_file(&self) -> PathBuf {
        self.home.join(LOG_FILE)
    }

    /// Create the home, key and scratch directories if missing
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.home.clone(), self.keys_dir(), self.tmp_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
                tracing::debug!("Created directory: {}", dir.display());
            }
        }
        Ok(())
    }
}
