//! HMAC key manager.

use keystack_crypto::HmacPrimitive;
use keystack_crypto::hmac::{MIN_KEY_SIZE, MIN_TAG_SIZE};
use keystack_crypto::random::random_bytes;
use keystack_types::{
    HashType, HmacKey, HmacKeyFormat, HmacParams, KeyData, KeyFormat, KeyMaterial, KeystackError,
    Result,
};

use super::{HMAC_TYPE_URL, KEY_VERSION, wrong_format, wrong_material};
use crate::key_manager::{
    KeyFactory, KeyManager, Primitive, PrimitiveKind, ensure_supported, validate_version,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacKeyManager;

impl HmacKeyManager {
    pub fn new() -> Self {
        Self
    }

    /// Tag size bounds and hash support.
    pub fn validate_params(params: &HmacParams) -> Result<()> {
        let tag_size = params.tag_size as usize;
        if tag_size < MIN_TAG_SIZE {
            return Err(KeystackError::invalid_argument(format!(
                "Invalid HmacParams: tag_size {tag_size} is too small."
            )));
        }
        let max_tag_size = match params.hash {
            HashType::Sha256 | HashType::Sha512 => params.hash.digest_size().unwrap_or_default(),
            other => {
                return Err(KeystackError::invalid_argument(format!(
                    "HashType '{other}' is not supported."
                )));
            }
        };
        if tag_size > max_tag_size {
            return Err(KeystackError::invalid_argument(format!(
                "Invalid HmacParams: tag_size {tag_size} is too big for HashType '{}'.",
                params.hash
            )));
        }
        Ok(())
    }

    pub fn validate_key(key: &HmacKey) -> Result<()> {
        validate_version(key.version, KEY_VERSION)?;
        if key.key_value.len() < MIN_KEY_SIZE {
            return Err(KeystackError::invalid_argument(
                "Invalid HmacKey: key_value is too short.",
            ));
        }
        Self::validate_params(&key.params)
    }

    pub fn validate_key_format(format: &HmacKeyFormat) -> Result<()> {
        if (format.key_size as usize) < MIN_KEY_SIZE {
            return Err(KeystackError::invalid_argument(
                "Invalid HmacKeyFormat: key_size is too small.",
            ));
        }
        Self::validate_params(&format.params)
    }
}

impl KeyManager for HmacKeyManager {
    fn key_type(&self) -> &str {
        HMAC_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::Mac
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::Hmac(key) = &key_data.value else {
            return Err(wrong_material("HmacKey", &key_data.value));
        };
        Self::validate_key(key)?;
        let mac = HmacPrimitive::new(key.params.hash, key.params.tag_size as usize, &key.key_value)?;
        Ok(Primitive::Mac(Box::new(mac)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }
}

impl KeyFactory for HmacKeyManager {
    fn new_key(&self, format: &KeyFormat) -> Result<KeyMaterial> {
        let KeyFormat::Hmac(format) = format else {
            return Err(wrong_format("HmacKeyFormat", format));
        };
        Self::validate_key_format(format)?;
        Ok(KeyMaterial::Hmac(HmacKey {
            version: KEY_VERSION,
            params: format.params,
            key_value: random_bytes(format.key_size as usize),
        }))
    }

    fn new_key_data(&self, format: &KeyFormat) -> Result<KeyData> {
        Ok(KeyData::new(HMAC_TYPE_URL, self.new_key(format)?))
    }
}
