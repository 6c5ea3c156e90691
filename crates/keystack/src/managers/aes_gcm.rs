//! AES-GCM key manager.

use keystack_crypto::AesGcmPrimitive;
use keystack_crypto::random::random_bytes;
use keystack_types::{
    AesGcmKey, AesGcmKeyFormat, KeyData, KeyFormat, KeyMaterial, KeystackError, Result,
};

use super::{AES_GCM_TYPE_URL, KEY_VERSION, wrong_format, wrong_material};
use crate::key_manager::{
    KeyFactory, KeyManager, Primitive, PrimitiveKind, ensure_supported, validate_version,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct AesGcmKeyManager;

impl AesGcmKeyManager {
    pub fn new() -> Self {
        Self
    }

    fn validate_key_size(size: usize) -> Result<()> {
        if size == 16 || size == 32 {
            Ok(())
        } else {
            Err(KeystackError::invalid_argument(format!(
                "Invalid key size: {size} bytes; supported sizes: 16 or 32 bytes."
            )))
        }
    }

    pub fn validate_key(key: &AesGcmKey) -> Result<()> {
        validate_version(key.version, KEY_VERSION)?;
        Self::validate_key_size(key.key_value.len())
    }

    pub fn validate_key_format(format: &AesGcmKeyFormat) -> Result<()> {
        Self::validate_key_size(format.key_size as usize)
    }
}

impl KeyManager for AesGcmKeyManager {
    fn key_type(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::Aead
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::AesGcm(key) = &key_data.value else {
            return Err(wrong_material("AesGcmKey", &key_data.value));
        };
        Self::validate_key(key)?;
        Ok(Primitive::Aead(Box::new(AesGcmPrimitive::new(&key.key_value)?)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }
}

impl KeyFactory for AesGcmKeyManager {
    fn new_key(&self, format: &KeyFormat) -> Result<KeyMaterial> {
        let KeyFormat::AesGcm(format) = format else {
            return Err(wrong_format("AesGcmKeyFormat", format));
        };
        Self::validate_key_format(format)?;
        Ok(KeyMaterial::AesGcm(AesGcmKey {
            version: KEY_VERSION,
            key_value: random_bytes(format.key_size as usize),
        }))
    }

    fn new_key_data(&self, format: &KeyFormat) -> Result<KeyData> {
        Ok(KeyData::new(AES_GCM_TYPE_URL, self.new_key(format)?))
    }
}
