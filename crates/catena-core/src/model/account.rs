use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// A local account: one key file in the keystore directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// Hex address without `0x` prefix, as written by the key generator
    pub address: String,

    pub keyfile_path: PathBuf,

    /// Key file content as written by the key generator
    pub raw: Value,
}
