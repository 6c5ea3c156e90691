//! Validated, immutable keysets.

use keystack_types::{KeyMaterialType, KeyTemplate, KeystackError, Result};
use tracing::info;

use crate::keyset::{Key, Keyset, KeysetInfo, validate_keyset};
use crate::keyset_manager::KeysetManager;
use crate::registry::Registry;

/// A keyset that passed [`validate_keyset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetHandle {
    keyset: Keyset,
}

impl KeysetHandle {
    /// Validates `keyset` and wraps it.
    pub fn new(keyset: Keyset) -> Result<Self> {
        validate_keyset(&keyset)?;
        Ok(Self { keyset })
    }

    /// A one-key keyset generated from `template`.
    pub fn generate_new(registry: &Registry, template: &KeyTemplate) -> Result<Self> {
        let mut manager = KeysetManager::new();
        manager.rotate(registry, template)?;
        manager.handle()
    }

    pub fn keyset(&self) -> &Keyset {
        &self.keyset
    }

    pub fn info(&self) -> KeysetInfo {
        self.keyset.info()
    }

    /// The same keyset with every private key replaced by its public key.
    ///
    /// Key ids, statuses, and prefix types are preserved.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any key is not an asymmetric private key.
    pub fn public_keyset_handle(&self, registry: &Registry) -> Result<Self> {
        let mut keys = Vec::with_capacity(self.keyset.keys.len());
        for key in &self.keyset.keys {
            let key_data = match &key.key_data {
                Some(data) if data.key_material_type == KeyMaterialType::AsymmetricPrivate => {
                    Some(registry.public_key_data(&data.type_url, data)?)
                }
                Some(_) => {
                    return Err(KeystackError::invalid_argument(format!(
                        "key {} is not an asymmetric private key",
                        key.key_id
                    )));
                }
                None => None,
            };
            keys.push(Key {
                key_data,
                status: key.status,
                key_id: key.key_id,
                output_prefix_type: key.output_prefix_type,
            });
        }

        info!(keys = keys.len(), "derived public keyset");
        Self::new(Keyset {
            primary_key_id: self.keyset.primary_key_id,
            keys,
        })
    }
}

impl From<KeysetHandle> for Keyset {
    fn from(handle: KeysetHandle) -> Self {
        handle.keyset
    }
}
