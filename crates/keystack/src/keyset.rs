//! Keysets: ordered keys plus a designated primary.

use std::collections::HashSet;

use keystack_types::{KeyData, KeyId, KeyStatus, KeystackError, OutputPrefixType, Result};
use serde::{Deserialize, Serialize};

/// One key of a keyset.
///
/// `key_data` is `None` once the key has been destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub key_data: Option<KeyData>,
    pub status: KeyStatus,
    pub key_id: KeyId,
    pub output_prefix_type: OutputPrefixType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyset {
    pub primary_key_id: KeyId,
    pub keys: Vec<Key>,
}

impl Keyset {
    pub fn key(&self, key_id: KeyId) -> Option<&Key> {
        self.keys.iter().find(|key| key.key_id == key_id)
    }

    /// Metadata only; safe to log.
    pub fn info(&self) -> KeysetInfo {
        KeysetInfo {
            primary_key_id: self.primary_key_id,
            key_info: self
                .keys
                .iter()
                .map(|key| KeyInfo {
                    type_url: key
                        .key_data
                        .as_ref()
                        .map(|data| data.type_url.clone())
                        .unwrap_or_default(),
                    status: key.status,
                    key_id: key.key_id,
                    output_prefix_type: key.output_prefix_type,
                })
                .collect(),
        }
    }
}

/// A key without its material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    pub type_url: String,
    pub status: KeyStatus,
    pub key_id: KeyId,
    pub output_prefix_type: OutputPrefixType,
}

/// A keyset without key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysetInfo {
    pub primary_key_id: KeyId,
    pub key_info: Vec<KeyInfo>,
}

/// Checks the structural rules every usable keyset follows.
///
/// - At least one key.
/// - Enabled keys carry key data and a known prefix type.
/// - Enabled key ids are unique.
/// - Exactly one enabled key has the primary id.
pub fn validate_keyset(keyset: &Keyset) -> Result<()> {
    if keyset.keys.is_empty() {
        return Err(KeystackError::invalid_argument(
            "A valid keyset must contain at least one key.",
        ));
    }

    let mut enabled_ids = HashSet::new();
    let mut has_primary = false;
    for key in &keyset.keys {
        if key.status == KeyStatus::Unknown {
            return Err(KeystackError::invalid_argument(format!(
                "key {} has unknown status",
                key.key_id
            )));
        }
        if key.status != KeyStatus::Enabled {
            continue;
        }
        if key.key_data.is_none() {
            return Err(KeystackError::invalid_argument(format!(
                "key {} has no key data",
                key.key_id
            )));
        }
        if key.output_prefix_type == OutputPrefixType::UnknownPrefix {
            return Err(KeystackError::invalid_argument(format!(
                "key {} has unknown prefix",
                key.key_id
            )));
        }
        if !enabled_ids.insert(key.key_id) {
            return Err(KeystackError::invalid_argument(format!(
                "keyset contains more than one enabled key with id {}",
                key.key_id
            )));
        }
        if key.key_id == keyset.primary_key_id {
            has_primary = true;
        }
    }

    if enabled_ids.is_empty() {
        return Err(KeystackError::invalid_argument(
            "keyset must contain at least one ENABLED key",
        ));
    }
    if !has_primary {
        return Err(KeystackError::invalid_argument(
            "keyset doesn't contain a valid primary key",
        ));
    }
    Ok(())
}
