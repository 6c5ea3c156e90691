//! Key rotation and lifecycle management.

use keystack_crypto::random::random_u32;
use keystack_types::{KeyId, KeyStatus, KeyTemplate, KeystackError, OutputPrefixType, Result};
use tracing::info;

use crate::keyset::{Key, Keyset};
use crate::keyset_handle::KeysetHandle;
use crate::registry::Registry;

/// Mutable keyset editor.
///
/// The primary key can never be disabled, destroyed, or deleted, and only
/// ENABLED keys can become primary.
#[derive(Debug, Clone, Default)]
pub struct KeysetManager {
    keyset: Keyset,
}

impl KeysetManager {
    /// Starts from an empty keyset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_handle(handle: &KeysetHandle) -> Self {
        Self {
            keyset: handle.keyset().clone(),
        }
    }

    /// Generates a key from `template` and adds it as ENABLED.
    pub fn add(&mut self, registry: &Registry, template: &KeyTemplate) -> Result<KeyId> {
        if template.output_prefix_type == OutputPrefixType::UnknownPrefix {
            return Err(KeystackError::invalid_argument(
                "key template has unknown output prefix type",
            ));
        }
        let key_data = registry.new_key_data(template)?;
        let key_id = self.fresh_key_id();
        self.keyset.keys.push(Key {
            key_data: Some(key_data),
            status: KeyStatus::Enabled,
            key_id,
            output_prefix_type: template.output_prefix_type,
        });
        Ok(key_id)
    }

    /// Adds a key from `template` and makes it primary.
    pub fn rotate(&mut self, registry: &Registry, template: &KeyTemplate) -> Result<KeyId> {
        let key_id = self.add(registry, template)?;
        self.set_primary(key_id)?;
        info!(%key_id, type_url = %template.type_url, "rotated keyset");
        Ok(key_id)
    }

    pub fn enable(&mut self, key_id: KeyId) -> Result<()> {
        let key = self.key_mut(key_id)?;
        match key.status {
            KeyStatus::Enabled | KeyStatus::Disabled => {
                key.status = KeyStatus::Enabled;
                Ok(())
            }
            status => Err(KeystackError::invalid_argument(format!(
                "Cannot enable key {key_id}: status is {status}"
            ))),
        }
    }

    pub fn disable(&mut self, key_id: KeyId) -> Result<()> {
        self.ensure_not_primary(key_id, "disable")?;
        let key = self.key_mut(key_id)?;
        match key.status {
            KeyStatus::Enabled | KeyStatus::Disabled => {
                key.status = KeyStatus::Disabled;
                Ok(())
            }
            status => Err(KeystackError::invalid_argument(format!(
                "Cannot disable key {key_id}: status is {status}"
            ))),
        }
    }

    /// Drops the key material and marks the key DESTROYED.
    pub fn destroy(&mut self, key_id: KeyId) -> Result<()> {
        self.ensure_not_primary(key_id, "destroy")?;
        let key = self.key_mut(key_id)?;
        match key.status {
            KeyStatus::Enabled | KeyStatus::Disabled | KeyStatus::Destroyed => {
                key.key_data = None;
                key.status = KeyStatus::Destroyed;
                Ok(())
            }
            KeyStatus::Unknown => Err(KeystackError::invalid_argument(format!(
                "Cannot destroy key {key_id}: status is {}",
                KeyStatus::Unknown
            ))),
        }
    }

    /// Removes the key entirely.
    pub fn delete(&mut self, key_id: KeyId) -> Result<()> {
        self.ensure_not_primary(key_id, "delete")?;
        let position = self
            .keyset
            .keys
            .iter()
            .position(|key| key.key_id == key_id)
            .ok_or_else(|| KeystackError::not_found(format!("key {key_id} not found")))?;
        self.keyset.keys.remove(position);
        Ok(())
    }

    pub fn set_primary(&mut self, key_id: KeyId) -> Result<()> {
        let key = self.key_mut(key_id)?;
        if key.status != KeyStatus::Enabled {
            return Err(KeystackError::invalid_argument(format!(
                "The candidate primary key {key_id} is not ENABLED"
            )));
        }
        self.keyset.primary_key_id = key_id;
        Ok(())
    }

    pub fn key_count(&self) -> usize {
        self.keyset.keys.len()
    }

    /// Validates and snapshots the current keyset.
    pub fn handle(&self) -> Result<KeysetHandle> {
        KeysetHandle::new(self.keyset.clone())
    }

    fn key_mut(&mut self, key_id: KeyId) -> Result<&mut Key> {
        self.keyset
            .keys
            .iter_mut()
            .find(|key| key.key_id == key_id)
            .ok_or_else(|| KeystackError::not_found(format!("key {key_id} not found")))
    }

    fn ensure_not_primary(&self, key_id: KeyId, action: &str) -> Result<()> {
        let is_primary = self.keyset.primary_key_id == key_id
            && self.keyset.keys.iter().any(|key| key.key_id == key_id);
        if is_primary {
            return Err(KeystackError::invalid_argument(format!(
                "Cannot {action} primary key {key_id}"
            )));
        }
        Ok(())
    }

    // Zero is the primary id of an empty keyset.
    fn fresh_key_id(&self) -> KeyId {
        loop {
            let candidate = KeyId::new(random_u32());
            if candidate != KeyId::default() && self.keyset.key(candidate).is_none() {
                return candidate;
            }
        }
    }
}
