//! Catena resource registry client
//!
//! The registry is the service of record for clouds, blockchains and nodes.
//! This crate maps each registry operation to one HTTP call; it keeps no
//! state, caches nothing and never retries.
//!
//! # Resources
//!
//! ```text
//! /v1/clouds                        list / create clouds
//! /v1/clouds/types                  supported cloud types
//! /v1/clouds/{id}/node_flavours     VM flavours of a cloud
//! /v1/clouds/{id}/instances         running instances (jumpbox candidates)
//! /v1/clouds/{id}/networks          networks of a cloud
//! /v1/chains                        list / create blockchains
//! /v1/chains/{id}                   get / delete a blockchain
//! /v1/chains/{id}/nodes             list / add nodes
//! /v1/chains/{id}/nodes/{id}        get / delete a node
//! /v1/backends/                     backend metadata
//! ```

pub mod client;
pub mod error;
pub mod request;

pub use client::{BackendInfo, Backends, HttpRegistry, Registry};
pub use error::{RegistryError, Result};
pub use request::{BlockchainRequest, CloudRequest, CloudRequestConfig, NewBlockchain, NodeRequest};
