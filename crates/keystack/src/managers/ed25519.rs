//! Ed25519 key managers.

use keystack_crypto::ed25519::{KEY_SIZE, generate_key_pair};
use keystack_crypto::{Ed25519SignPrimitive, Ed25519VerifyPrimitive};
use keystack_types::{
    Ed25519PrivateKey, Ed25519PublicKey, KeyData, KeyFormat, KeyMaterial, KeystackError, Result,
};

use super::{
    ED25519_PRIVATE_TYPE_URL, ED25519_PUBLIC_TYPE_URL, KEY_VERSION, public_key_factory_error,
    wrong_format, wrong_material,
};
use crate::key_manager::{
    KeyFactory, KeyManager, Primitive, PrimitiveKind, PrivateKeyFactory, ensure_supported,
    validate_version,
};

fn validate_key_size(len: usize, what: &str) -> Result<()> {
    if len == KEY_SIZE {
        Ok(())
    } else {
        Err(KeystackError::invalid_argument(format!(
            "The {what} must be {KEY_SIZE} bytes, got {len}."
        )))
    }
}

fn validate_public_key(key: &Ed25519PublicKey) -> Result<()> {
    validate_version(key.version, KEY_VERSION)?;
    validate_key_size(key.key_value.len(), "ED25519 public key")
}

fn validate_private_key(key: &Ed25519PrivateKey) -> Result<()> {
    validate_version(key.version, KEY_VERSION)?;
    validate_key_size(key.key_value.len(), "ED25519 private key")?;
    validate_public_key(&key.public_key)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519SignKeyManager;

impl Ed25519SignKeyManager {
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for Ed25519SignKeyManager {
    fn key_type(&self) -> &str {
        ED25519_PRIVATE_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::PublicKeySign
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::Ed25519Private(key) = &key_data.value else {
            return Err(wrong_material("Ed25519PrivateKey", &key_data.value));
        };
        validate_private_key(key)?;
        let signer = Ed25519SignPrimitive::new(&key.key_value)?;
        Ok(Primitive::PublicKeySign(Box::new(signer)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn private_key_factory(&self) -> Option<&dyn PrivateKeyFactory> {
        Some(self)
    }
}

impl KeyFactory for Ed25519SignKeyManager {
    fn new_key(&self, format: &KeyFormat) -> Result<KeyMaterial> {
        if *format != KeyFormat::Ed25519 {
            return Err(wrong_format("Ed25519KeyFormat", format));
        }
        let (seed, public_key) = generate_key_pair();
        Ok(KeyMaterial::Ed25519Private(Ed25519PrivateKey {
            version: KEY_VERSION,
            public_key: Ed25519PublicKey {
                version: KEY_VERSION,
                key_value: public_key,
            },
            key_value: seed.to_vec(),
        }))
    }

    fn new_key_data(&self, format: &KeyFormat) -> Result<KeyData> {
        Ok(KeyData::new(ED25519_PRIVATE_TYPE_URL, self.new_key(format)?))
    }
}

impl PrivateKeyFactory for Ed25519SignKeyManager {
    fn public_key_data(&self, private_key_data: &KeyData) -> Result<KeyData> {
        ensure_supported(self, private_key_data)?;
        let KeyMaterial::Ed25519Private(key) = &private_key_data.value else {
            return Err(wrong_material("Ed25519PrivateKey", &private_key_data.value));
        };
        validate_private_key(key)?;
        Ok(KeyData::new(
            ED25519_PUBLIC_TYPE_URL,
            KeyMaterial::Ed25519Public(key.public_key.clone()),
        ))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519VerifyKeyManager;

impl Ed25519VerifyKeyManager {
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for Ed25519VerifyKeyManager {
    fn key_type(&self) -> &str {
        ED25519_PUBLIC_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::PublicKeyVerify
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::Ed25519Public(key) = &key_data.value else {
            return Err(wrong_material("Ed25519PublicKey", &key_data.value));
        };
        validate_public_key(key)?;
        let verifier = Ed25519VerifyPrimitive::new(&key.key_value)?;
        Ok(Primitive::PublicKeyVerify(Box::new(verifier)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }
}

impl KeyFactory for Ed25519VerifyKeyManager {
    fn new_key(&self, _format: &KeyFormat) -> Result<KeyMaterial> {
        Err(public_key_factory_error("Ed25519SignKeyManager"))
    }

    fn new_key_data(&self, _format: &KeyFormat) -> Result<KeyData> {
        Err(public_key_factory_error("Ed25519SignKeyManager"))
    }
}
