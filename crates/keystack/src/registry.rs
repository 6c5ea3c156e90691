//! Explicit key manager registry.
//!
//! A [`Registry`] maps type URLs to [`KeyManager`]s and turns keysets into
//! wrapped primitives. It is an ordinary value: construct one at startup,
//! pass it by reference, and call [`Registry::reset`] to tear it down.
//!
//! # Registration rules
//!
//! - Registering a manager under a new type URL always succeeds.
//! - Registering the same manager type again may forbid new keys, but can
//!   never re-allow them once forbidden (`AlreadyExists`).
//! - Registering a different manager type under a taken URL fails with
//!   `AlreadyExists`.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use keystack_config::RegistryConfig;
use keystack_crypto::{Aead, Mac, PublicKeySign, PublicKeyVerify};
use keystack_types::{KeyData, KeyStatus, KeyTemplate, KeystackError, Result};
use tracing::{info, warn};

use crate::key_manager::{Capability, KeyManager};
use crate::keyset::validate_keyset;
use crate::keyset_handle::KeysetHandle;
use crate::managers::{
    AES_GCM_TYPE_URL, AesGcmKeyManager, ECDSA_PRIVATE_TYPE_URL, ECDSA_PUBLIC_TYPE_URL,
    ED25519_PRIVATE_TYPE_URL, ED25519_PUBLIC_TYPE_URL, EcdsaSignKeyManager, EcdsaVerifyKeyManager,
    Ed25519SignKeyManager, Ed25519VerifyKeyManager, HMAC_TYPE_URL, HmacKeyManager,
};
use crate::primitive_set::{PrimitiveSet, PrimitiveSetBuilder};
use crate::wrapper::{AeadWrapper, MacWrapper, PublicKeySignWrapper, PublicKeyVerifyWrapper};

struct RegisteredManager {
    manager: Arc<dyn KeyManager>,
    new_key_allowed: bool,
}

/// Type URL to key manager table.
pub struct Registry {
    managers: RwLock<HashMap<String, RegisteredManager>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            managers: RwLock::new(HashMap::new()),
        }
    }

    /// A registry with every built-in manager, all allowed to mint keys.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&RegistryConfig::default())
    }

    /// Registers the catalogues `config` enables, then applies its per-type
    /// `new_key_allowed` overrides.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the config fails validation, `NotFound` if an
    /// override names a type URL no enabled catalogue registers.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| KeystackError::invalid_argument(e.to_string()))?;

        let allowed = |type_url: &str| {
            config
                .key_types
                .iter()
                .find(|entry| entry.type_url == type_url)
                .is_none_or(|entry| entry.new_key_allowed)
        };

        let registry = Self::new();
        if config.mac {
            registry.register_key_manager(HmacKeyManager::new(), allowed(HMAC_TYPE_URL))?;
        }
        if config.aead {
            registry.register_key_manager(AesGcmKeyManager::new(), allowed(AES_GCM_TYPE_URL))?;
        }
        if config.signature {
            registry.register_key_manager(
                EcdsaSignKeyManager::new(),
                allowed(ECDSA_PRIVATE_TYPE_URL),
            )?;
            registry.register_key_manager(
                EcdsaVerifyKeyManager::new(),
                allowed(ECDSA_PUBLIC_TYPE_URL),
            )?;
            registry.register_key_manager(
                Ed25519SignKeyManager::new(),
                allowed(ED25519_PRIVATE_TYPE_URL),
            )?;
            registry.register_key_manager(
                Ed25519VerifyKeyManager::new(),
                allowed(ED25519_PUBLIC_TYPE_URL),
            )?;
        }

        for entry in &config.key_types {
            if !registry.is_registered(&entry.type_url)? {
                return Err(KeystackError::not_found(format!(
                    "registry.key_types names '{}', which no enabled catalogue registers",
                    entry.type_url
                )));
            }
        }
        Ok(registry)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, RegisteredManager>>> {
        self.managers
            .read()
            .map_err(|_| KeystackError::internal("registry lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, RegisteredManager>>> {
        self.managers
            .write()
            .map_err(|_| KeystackError::internal("registry lock poisoned"))
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn register_key_manager<M>(&self, manager: M, new_key_allowed: bool) -> Result<()>
    where
        M: KeyManager + 'static,
    {
        self.register_shared(Arc::new(manager), new_key_allowed)
    }

    /// Registers an already shared manager.
    pub fn register_shared(
        &self,
        manager: Arc<dyn KeyManager>,
        new_key_allowed: bool,
    ) -> Result<()> {
        let type_url = manager.key_type().to_string();
        if type_url.is_empty() {
            return Err(KeystackError::invalid_argument(
                "key manager has an empty type URL",
            ));
        }

        let mut managers = self.write()?;
        if let Some(existing) = managers.get_mut(&type_url) {
            if existing.manager.manager_name() != manager.manager_name() {
                return Err(KeystackError::already_exists(format!(
                    "A manager for type '{type_url}' has been already registered."
                )));
            }
            if !existing.new_key_allowed && new_key_allowed {
                return Err(KeystackError::already_exists(format!(
                    "A manager for type '{type_url}' has been already registered with forbidden new key operation."
                )));
            }
            existing.new_key_allowed = new_key_allowed;
            info!(%type_url, new_key_allowed, "updated key manager registration");
            return Ok(());
        }

        managers.insert(
            type_url.clone(),
            RegisteredManager {
                manager,
                new_key_allowed,
            },
        );
        info!(%type_url, new_key_allowed, "registered key manager");
        Ok(())
    }

    pub fn is_registered(&self, type_url: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(type_url))
    }

    pub fn new_key_allowed(&self, type_url: &str) -> Result<bool> {
        self.read()?
            .get(type_url)
            .map(|entry| entry.new_key_allowed)
            .ok_or_else(|| not_registered(type_url))
    }

    /// The manager registered for `type_url`.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is registered under `type_url`.
    pub fn key_manager(&self, type_url: &str) -> Result<Arc<dyn KeyManager>> {
        self.read()?
            .get(type_url)
            .map(|entry| Arc::clone(&entry.manager))
            .ok_or_else(|| not_registered(type_url))
    }

    /// Like [`Registry::key_manager`], but also checks the manager produces
    /// primitives of capability `P`.
    pub fn typed_key_manager<P>(&self, type_url: &str) -> Result<Arc<dyn KeyManager>>
    where
        P: ?Sized + Capability,
    {
        let manager = self.key_manager(type_url)?;
        if manager.primitive_kind() != P::KIND {
            return Err(KeystackError::invalid_argument(format!(
                "Wrong Primitive type for key type '{type_url}': the manager produces {}, not {}",
                manager.primitive_kind(),
                P::KIND
            )));
        }
        Ok(manager)
    }

    /// Registered type URLs, sorted.
    pub fn type_urls(&self) -> Result<Vec<String>> {
        let mut type_urls: Vec<String> = self.read()?.keys().cloned().collect();
        type_urls.sort();
        Ok(type_urls)
    }

    /// Drops every registration.
    pub fn reset(&self) -> Result<()> {
        self.write()?.clear();
        info!("registry reset");
        Ok(())
    }

    // ========================================================================
    // Key generation
    // ========================================================================

    /// Generates key data as described by `template`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unregistered type, `InvalidArgument` if the type
    /// forbids new keys or the template's format is invalid.
    pub fn new_key_data(&self, template: &KeyTemplate) -> Result<KeyData> {
        let (manager, new_key_allowed) = {
            let managers = self.read()?;
            let entry = managers
                .get(&template.type_url)
                .ok_or_else(|| not_registered(&template.type_url))?;
            (Arc::clone(&entry.manager), entry.new_key_allowed)
        };
        if !new_key_allowed {
            return Err(KeystackError::invalid_argument(format!(
                "KeyManager for type '{}' does not allow creation of new keys.",
                template.type_url
            )));
        }
        manager.key_factory().new_key_data(&template.format)
    }

    /// The public half of `private_key_data`.
    pub fn public_key_data(&self, type_url: &str, private_key_data: &KeyData) -> Result<KeyData> {
        let manager = self.key_manager(type_url)?;
        let factory = manager.private_key_factory().ok_or_else(|| {
            KeystackError::invalid_argument(format!(
                "KeyManager for type '{type_url}' does not have a PrivateKeyFactory."
            ))
        })?;
        factory.public_key_data(private_key_data)
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// Builds a single primitive from `key_data`.
    pub fn primitive<P>(&self, key_data: &KeyData) -> Result<Box<P>>
    where
        P: ?Sized + Capability,
    {
        let manager = self.typed_key_manager::<P>(&key_data.type_url)?;
        P::from_primitive(manager.primitive(key_data)?)
    }

    /// Builds a primitive set from every ENABLED key of `handle`.
    ///
    /// Keys whose type URL `custom_manager` supports are built by it instead
    /// of the registered manager. The keyset's primary becomes the set's
    /// primary.
    pub fn primitives<P>(
        &self,
        handle: &KeysetHandle,
        custom_manager: Option<&dyn KeyManager>,
    ) -> Result<PrimitiveSet<P>>
    where
        P: ?Sized + Capability,
    {
        let keyset = handle.keyset();
        validate_keyset(keyset)?;

        let builder = PrimitiveSetBuilder::<P>::new();
        for key in &keyset.keys {
            if key.status != KeyStatus::Enabled {
                warn!(key_id = %key.key_id, status = %key.status, "skipping key that is not enabled");
                continue;
            }
            let key_data = key.key_data.as_ref().ok_or_else(|| {
                KeystackError::invalid_argument(format!("key {} has no key data", key.key_id))
            })?;

            let primitive = match custom_manager {
                Some(manager) if manager.does_support(&key_data.type_url) => {
                    P::from_primitive(manager.primitive(key_data)?)?
                }
                _ => self.primitive::<P>(key_data)?,
            };

            let entry =
                builder.add_primitive(primitive, key.key_id, key.status, key.output_prefix_type)?;
            if key.key_id == keyset.primary_key_id {
                builder.set_primary(entry)?;
            }
        }
        builder.build()
    }

    pub fn new_mac(&self, handle: &KeysetHandle) -> Result<MacWrapper> {
        MacWrapper::new(self.primitives::<dyn Mac>(handle, None)?)
    }

    pub fn new_aead(&self, handle: &KeysetHandle) -> Result<AeadWrapper> {
        AeadWrapper::new(self.primitives::<dyn Aead>(handle, None)?)
    }

    pub fn new_public_key_sign(&self, handle: &KeysetHandle) -> Result<PublicKeySignWrapper> {
        PublicKeySignWrapper::new(self.primitives::<dyn PublicKeySign>(handle, None)?)
    }

    pub fn new_public_key_verify(&self, handle: &KeysetHandle) -> Result<PublicKeyVerifyWrapper> {
        PublicKeyVerifyWrapper::new(self.primitives::<dyn PublicKeyVerify>(handle, None)?)
    }
}

fn not_registered(type_url: &str) -> KeystackError {
    KeystackError::not_found(format!("No manager for type '{type_url}' has been registered."))
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_urls = self.type_urls().unwrap_or_default();
        f.debug_struct("Registry")
            .field("type_urls", &type_urls)
            .finish()
    }
}
