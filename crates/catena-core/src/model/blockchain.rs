use crate::embedded;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A blockchain network registered with the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockchain {
    pub id: String,

    pub name: String,

    /// Blockchain backend (e.g. "ethereum"). Older registries call it `chain_backend`.
    #[serde(default, alias = "chain_backend")]
    pub backend: String,

    #[serde(default)]
    pub cloud_id: String,

    #[serde(default, deserialize_with = "embedded::object_or_string")]
    pub chain_config: ChainConfig,

    #[serde(default, deserialize_with = "embedded::object_or_string")]
    pub cloud_config: CloudConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Blockchain {
    pub fn label(&self) -> String {
        super::menu_label(&self.name, &self.id)
    }
}

/// Chain-level settings of a blockchain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain type within the backend (e.g. "poa")
    #[serde(rename = "type", default)]
    pub chain_type: String,

    #[serde(default)]
    pub mining_account: Option<String>,

    /// Genesis block, passed through untouched
    #[serde(default)]
    pub genesis: Option<Value>,

    #[serde(default, deserialize_with = "embedded::optional_u64")]
    pub network_id: Option<u64>,

    #[serde(default)]
    pub external_bootnodes: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cloud-level settings of a blockchain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default)]
    pub controller_flavour: Option<String>,

    #[serde(default)]
    pub jumpbox: Option<String>,

    #[serde(default)]
    pub jumpbox_key: Option<String>,

    #[serde(default)]
    pub network: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
