//! Local account keystore
//!
//! Accounts are created by an external key generator (`geth account new`)
//! and stored as one JSON file per account. A key file's name ends with the
//! account address, which is how accounts are looked up.
//!
//! # Example
//!
//! ```ignore
//! use catena_keystore::{Geth, Keystore};
//!
//! let keystore = Keystore::new("/home/me/.catena/keys", "/home/me/.catena/tmp", Geth::new("geth"));
//! keystore.ensure_dirs().await?;
//! let (address, keyfile) = keystore.create_account("secret").await?;
//! ```

pub mod error;
pub mod geth;
pub mod store;

pub use error::{KeystoreError, Result};
pub use geth::{Geth, KeyGenerator, parse_address};
pub use store::Keystore;
