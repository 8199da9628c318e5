//! Catena domain model
//!
//! Value types shared by the registry client, the bundle codec and the
//! workflow orchestrator:
//!
//! - [`Cloud`], [`Blockchain`], [`Node`]: records owned by the remote registry
//! - [`Account`]: a key file in the local keystore
//! - [`Enode`]: the externally reachable address of a blockchain node
//!
//! The registry transmits nested configuration objects (`chain_config`,
//! `cloud_config`) as strings containing JSON. They decode here into typed
//! structs, so call sites never reparse text.

pub mod embedded;
pub mod enode;
pub mod error;
pub mod model;

pub use enode::{DEFAULT_ENODE_PORT, Enode};
pub use error::{ModelError, Result};
pub use model::*;
