//! Catena configuration bundles
//!
//! A bundle is a directory that captures one blockchain's configuration so
//! that an equivalent blockchain can be created against another registry,
//! or a local node can join the network:
//!
//! ```text
//! <bundle>/
//! ├── genesis.json             genesis block, passed through untouched
//! ├── external_bootnodes.json  ["enode://<id>@<ip>:30303", ...]
//! ├── chain_config.json        {"backend", "network_id", "type"}
//! ├── run-geth.sh              init and run a local node
//! ├── attach-geth.sh           attach a console to the running node
//! └── run-mist.sh              GUI client (optional)
//! ```

pub mod codec;
pub mod error;
pub mod manifest;
pub mod scripts;

pub use codec::BundleCodec;
pub use error::{BundleError, Result};
pub use manifest::{Bundle, ChainManifest};
pub use scripts::{Script, ScriptOptions};
