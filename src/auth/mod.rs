//! Credential module
//!
//! API keys travel as a query parameter. A [`KeyRing`] holds the ordered keys
//! and walks forward through them when the upstream rejects the active one.

mod keyring;
mod types;

pub use keyring::{mask_key, KeyRing};
pub use types::Credentials;
