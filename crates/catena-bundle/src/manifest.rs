//! Bundle contents

use catena_core::Blockchain;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENESIS_FILE: &str = "genesis.json";
pub const BOOTNODES_FILE: &str = "external_bootnodes.json";
pub const CHAIN_CONFIG_FILE: &str = "chain_config.json";

/// Content of `chain_config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainManifest {
    pub backend: String,

    /// Older bundles carry the registry's value verbatim, sometimes a string
    #[serde(default, deserialize_with = "catena_core::embedded::optional_u64")]
    pub network_id: Option<u64>,

    #[serde(rename = "type")]
    pub chain_type: String,
}

/// Everything needed to recreate an equivalent blockchain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    /// Genesis block; `Value::Null` when the registry chose one itself
    pub genesis: Value,

    /// Enode URLs of externally reachable nodes
    pub external_bootnodes: Vec<String>,

    pub chain_config: ChainManifest,
}

impl Bundle {
    /// Capture a blockchain's configuration together with the enode URLs
    /// of its externally reachable nodes
    pub fn from_blockchain(blockchain: &Blockchain, external_bootnodes: Vec<String>) -> Self {
        let chain = &blockchain.chain_config;
        Self {
            genesis: chain.genesis.clone().unwrap_or(Value::Null),
            external_bootnodes,
            chain_config: ChainManifest {
                backend: blockchain.backend.clone(),
                network_id: chain.network_id,
                chain_type: chain.chain_type.clone(),
            },
        }
    }

    /// Genesis as an optional value, `None` when absent
    pub fn genesis(&self) -> Option<Value> {
        match &self.genesis {
            Value::Null => None,
            genesis => Some(genesis.clone()),
        }
    }
}
