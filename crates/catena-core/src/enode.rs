//! Enode URLs
//!
//! An enode identifies a node on the blockchain's peer network:
//! `enode://<node_id>@<ip>:<port>`.

use crate::error::{ModelError, Result};
use std::fmt;
use std::net::IpAddr;

/// Peer port every generated enode points at
pub const DEFAULT_ENODE_PORT: u16 = 30303;

/// Externally reachable address of a blockchain node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enode {
    node_id: String,
    ip: IpAddr,
    port: u16,
}

impl Enode {
    /// Build an enode on the default peer port from a node id and an
    /// operator-supplied IP address.
    pub fn from_parts(node_id: &str, ip: &str) -> Result<Self> {
        let node_id = Self::validate_node_id(node_id)?;
        let ip = ip
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ModelError::InvalidIp(ip.trim().to_string()))?;

        Ok(Self {
            node_id: node_id.to_string(),
            ip,
            port: DEFAULT_ENODE_PORT,
        })
    }

    /// Trimmed `node_id`, which must be non-empty hex. Enodes end up in
    /// generated shell scripts, so nothing else may pass.
    pub fn validate_node_id(node_id: &str) -> Result<&str> {
        let node_id = node_id.trim();
        if node_id.is_empty() {
            return Err(ModelError::EmptyNodeId);
        }
        if !node_id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ModelError::InvalidNodeId(node_id.to_string()));
        }
        Ok(node_id)
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Enode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(ip) => write!(f, "enode://{}@{}:{}", self.node_id, ip, self.port),
            IpAddr::V6(ip) => write!(f, "enode://{}@[{}]:{}", self.node_id, ip, self.port),
        }
    }
}
