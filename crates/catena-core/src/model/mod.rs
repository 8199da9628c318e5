//! Registry and keystore records

pub mod account;
pub mod blockchain;
pub mod cloud;
pub mod node;

pub use account::Account;
pub use blockchain::{Blockchain, ChainConfig, CloudConfig};
pub use cloud::Cloud;
pub use node::{CONTROLLER_NODE_TYPE, Node, NodeChainConfig};

/// Menu label in the `"<name> (<id>)"` form used for every registry record
pub fn menu_label(name: &str, id: &str) -> String {
    format!("{} ({})", name, id)
}
