//! Credential input types

use serde::{Deserialize, Serialize};

/// Credentials as supplied by the caller
///
/// A single key cannot be rotated. A list of keys (even of length one) can
/// rotate forward until it runs out.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credentials {
    /// One key, rotation disabled
    Single(String),
    /// Ordered keys, tried front to back
    List(Vec<String>),
}

impl Credentials {
    /// Number of keys carried
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(keys) => keys.len(),
        }
    }

    /// True when no key is carried
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Credentials {
    fn from(key: &str) -> Self {
        Self::Single(key.to_string())
    }
}

impl From<String> for Credentials {
    fn from(key: String) -> Self {
        Self::Single(key)
    }
}

impl From<Vec<String>> for Credentials {
    fn from(keys: Vec<String>) -> Self {
        Self::List(keys)
    }
}

impl From<Vec<&str>> for Credentials {
    fn from(keys: Vec<&str>) -> Self {
        Self::List(keys.into_iter().map(String::from).collect())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(key) => f
                .debug_tuple("Single")
                .field(&super::mask_key(key))
                .finish(),
            Self::List(keys) => f
                .debug_tuple("List")
                .field(&keys.iter().map(|k| super::mask_key(k)).collect::<Vec<_>>())
                .finish(),
        }
    }
}
