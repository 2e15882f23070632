//! Key ring with forward-only rotation

use super::types::Credentials;
use crate::error::{Error, Result};
use tracing::warn;

/// Ordered API keys with a rotation cursor
///
/// Invariant: `cursor < keys.len()` and `keys` is never empty.
/// Rotation never wraps, so a ring of N keys survives at most N-1 rejections.
#[derive(Clone)]
pub struct KeyRing {
    keys: Vec<String>,
    cursor: usize,
    rotatable: bool,
}

impl KeyRing {
    /// Create a rotatable ring from an ordered list of keys
    pub fn new(keys: Vec<String>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::config("Key ring needs at least one API key"));
        }
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err(Error::config("API keys cannot be blank"));
        }
        Ok(Self {
            keys,
            cursor: 0,
            rotatable: true,
        })
    }

    /// Create a ring from a single key; it cannot rotate
    pub fn single(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::config("API keys cannot be blank"));
        }
        Ok(Self {
            keys: vec![key],
            cursor: 0,
            rotatable: false,
        })
    }

    /// Build a ring from caller credentials
    pub fn from_credentials(credentials: Credentials) -> Result<Self> {
        match credentials {
            Credentials::Single(key) => Self::single(key),
            Credentials::List(keys) => Self::new(keys),
        }
    }

    /// The active key
    pub fn current(&self) -> &str {
        &self.keys[self.cursor]
    }

    /// Advance to the next key
    ///
    /// Fails with [`Error::KeyRingExhausted`] when the active key is the last
    /// one or the ring was built from a single key.
    pub fn rotate(&mut self) -> Result<()> {
        if !self.rotatable || self.cursor + 1 == self.keys.len() {
            return Err(Error::KeyRingExhausted {
                tried: self.cursor + 1,
            });
        }
        let previous = mask_key(self.current());
        self.cursor += 1;
        warn!(
            "Rotated API key {} -> {} ({}/{})",
            previous,
            mask_key(self.current()),
            self.cursor + 1,
            self.keys.len()
        );
        Ok(())
    }

    /// Index of the active key
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of keys in the ring
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; an empty ring cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys not yet tried after the active one
    pub fn remaining(&self) -> usize {
        if self.rotatable {
            self.keys.len() - self.cursor - 1
        } else {
            0
        }
    }

    /// Whether the ring was built from a list
    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("current", &mask_key(self.current()))
            .field("position", &self.cursor)
            .field("len", &self.keys.len())
            .field("rotatable", &self.rotatable)
            .finish()
    }
}

/// Mask an API key for logs, keeping the first four characters
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}****")
}
