use crate::embedded;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type that every blockchain has exactly once and that cannot be removed
pub const CONTROLLER_NODE_TYPE: &str = "controller";

/// A node belonging to a blockchain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(default)]
    pub blockchain_id: String,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub flavour: String,

    pub name: String,

    #[serde(default, deserialize_with = "embedded::object_or_string")]
    pub chain_config: NodeChainConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn label(&self) -> String {
        super::menu_label(&self.name, &self.id)
    }

    pub fn is_controller(&self) -> bool {
        self.node_type == CONTROLLER_NODE_TYPE
    }

    /// Chain-level node identifier used to build the node's enode URL
    pub fn eth_node_id(&self) -> Option<&str> {
        self.chain_config
            .eth_node_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Chain-specific settings of a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeChainConfig {
    #[serde(default)]
    pub eth_node_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
