//! ECDSA key managers.
//!
//! Curve and hash must agree: NIST P-256 signs SHA-256 digests, P-384 and
//! P-521 sign SHA-512 digests. P-521 keys pass validation but building a
//! primitive or a new key for them fails with `Unimplemented`.

use keystack_crypto::ecdsa::generate_key_pair;
use keystack_crypto::{EcdsaSignPrimitive, EcdsaVerifyPrimitive};
use keystack_types::{
    EcdsaParams, EcdsaPrivateKey, EcdsaPublicKey, EcdsaSignatureEncoding, EllipticCurve, HashType,
    KeyData, KeyFormat, KeyMaterial, KeystackError, Result,
};

use super::{
    ECDSA_PRIVATE_TYPE_URL, ECDSA_PUBLIC_TYPE_URL, KEY_VERSION, public_key_factory_error,
    wrong_format, wrong_material,
};
use crate::key_manager::{
    KeyFactory, KeyManager, Primitive, PrimitiveKind, PrivateKeyFactory, ensure_supported,
    validate_version,
};

/// Checks the encoding and the curve/hash pairing.
pub fn validate_ecdsa_params(params: &EcdsaParams) -> Result<()> {
    match params.encoding {
        EcdsaSignatureEncoding::Der | EcdsaSignatureEncoding::IeeeP1363 => {}
        EcdsaSignatureEncoding::UnknownEncoding => {
            return Err(KeystackError::invalid_argument(
                "Unsupported signature encoding.",
            ));
        }
    }
    match params.curve {
        EllipticCurve::NistP256 => {
            if params.hash_type != HashType::Sha256 {
                return Err(KeystackError::invalid_argument(
                    "Only SHA256 is supported for NIST P256.",
                ));
            }
        }
        EllipticCurve::NistP384 | EllipticCurve::NistP521 => {
            if params.hash_type != HashType::Sha512 {
                return Err(KeystackError::invalid_argument(
                    "Only SHA512 is supported for this curve.",
                ));
            }
        }
        EllipticCurve::UnknownCurve => {
            return Err(KeystackError::invalid_argument("Unsupported elliptic curve."));
        }
    }
    Ok(())
}

fn validate_public_key(key: &EcdsaPublicKey) -> Result<()> {
    validate_version(key.version, KEY_VERSION)?;
    validate_ecdsa_params(&key.params)
}

fn validate_private_key(key: &EcdsaPrivateKey) -> Result<()> {
    validate_version(key.version, KEY_VERSION)?;
    validate_public_key(&key.public_key)
}

// ============================================================================
// Signing
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaSignKeyManager;

impl EcdsaSignKeyManager {
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for EcdsaSignKeyManager {
    fn key_type(&self) -> &str {
        ECDSA_PRIVATE_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::PublicKeySign
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::EcdsaPrivate(key) = &key_data.value else {
            return Err(wrong_material("EcdsaPrivateKey", &key_data.value));
        };
        validate_private_key(key)?;
        let signer = EcdsaSignPrimitive::new(key.public_key.params, &key.key_value)?;
        Ok(Primitive::PublicKeySign(Box::new(signer)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn private_key_factory(&self) -> Option<&dyn PrivateKeyFactory> {
        Some(self)
    }
}

impl KeyFactory for EcdsaSignKeyManager {
    fn new_key(&self, format: &KeyFormat) -> Result<KeyMaterial> {
        let KeyFormat::Ecdsa(format) = format else {
            return Err(wrong_format("EcdsaKeyFormat", format));
        };
        let params = format
            .params
            .ok_or_else(|| KeystackError::invalid_argument("Missing params."))?;
        validate_ecdsa_params(&params)?;

        let pair = generate_key_pair(params.curve)?;
        Ok(KeyMaterial::EcdsaPrivate(EcdsaPrivateKey {
            version: KEY_VERSION,
            public_key: EcdsaPublicKey {
                version: KEY_VERSION,
                params,
                x: pair.x.clone(),
                y: pair.y.clone(),
            },
            key_value: pair.private_scalar.to_vec(),
        }))
    }

    fn new_key_data(&self, format: &KeyFormat) -> Result<KeyData> {
        Ok(KeyData::new(ECDSA_PRIVATE_TYPE_URL, self.new_key(format)?))
    }
}

impl PrivateKeyFactory for EcdsaSignKeyManager {
    fn public_key_data(&self, private_key_data: &KeyData) -> Result<KeyData> {
        ensure_supported(self, private_key_data)?;
        let KeyMaterial::EcdsaPrivate(key) = &private_key_data.value else {
            return Err(wrong_material("EcdsaPrivateKey", &private_key_data.value));
        };
        validate_private_key(key)?;
        Ok(KeyData::new(
            ECDSA_PUBLIC_TYPE_URL,
            KeyMaterial::EcdsaPublic(key.public_key.clone()),
        ))
    }
}

// ============================================================================
// Verification
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaVerifyKeyManager;

impl EcdsaVerifyKeyManager {
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for EcdsaVerifyKeyManager {
    fn key_type(&self) -> &str {
        ECDSA_PUBLIC_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        PrimitiveKind::PublicKeyVerify
    }

    fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        ensure_supported(self, key_data)?;
        let KeyMaterial::EcdsaPublic(key) = &key_data.value else {
            return Err(wrong_material("EcdsaPublicKey", &key_data.value));
        };
        validate_public_key(key)?;
        let verifier = EcdsaVerifyPrimitive::new(key.params, &key.x, &key.y)?;
        Ok(Primitive::PublicKeyVerify(Box::new(verifier)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }
}

// Public keys are derived from private keys, never generated.
impl KeyFactory for EcdsaVerifyKeyManager {
    fn new_key(&self, _format: &KeyFormat) -> Result<KeyMaterial> {
        Err(public_key_factory_error("EcdsaSignKeyManager"))
    }

    fn new_key_data(&self, _format: &KeyFormat) -> Result<KeyData> {
        Err(public_key_factory_error("EcdsaSignKeyManager"))
    }
}
