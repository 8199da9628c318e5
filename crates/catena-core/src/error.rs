//! Domain model error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Node id must not be empty")]
    EmptyNodeId,

    #[error("Invalid node id, expected hex digits: {0}")]
    InvalidNodeId(String),

    #[error("Invalid IP address: {0}")]
    InvalidIp(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
