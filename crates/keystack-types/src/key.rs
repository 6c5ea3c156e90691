//! Key material, key formats, and templates.
//!
//! Key material is a closed sum type: the compiler, not a runtime type
//! check, decides which kind of key a manager is holding. Secret bytes are
//! zeroed on drop and never printed by `Debug`.

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{EcdsaSignatureEncoding, EllipticCurve, HashType, KeyMaterialType, OutputPrefixType};

// ============================================================================
// HMAC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HmacParams {
    pub hash: HashType,
    /// Tag length in bytes after truncation.
    pub tag_size: u32,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct HmacKey {
    pub version: u32,
    #[zeroize(skip)]
    pub params: HmacParams,
    pub key_value: Vec<u8>,
}

impl Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .field("key_value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HmacKeyFormat {
    pub params: HmacParams,
    pub key_size: u32,
}

// ============================================================================
// AES-GCM
// ============================================================================

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AesGcmKey {
    pub version: u32,
    pub key_value: Vec<u8>,
}

impl Debug for AesGcmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmKey")
            .field("version", &self.version)
            .field("key_value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AesGcmKeyFormat {
    pub key_size: u32,
}

// ============================================================================
// ECDSA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EcdsaParams {
    pub hash_type: HashType,
    pub curve: EllipticCurve,
    pub encoding: EcdsaSignatureEncoding,
}

/// ECDSA public key as affine big-endian coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaPublicKey {
    pub version: u32,
    pub params: EcdsaParams,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct EcdsaPrivateKey {
    pub version: u32,
    #[zeroize(skip)]
    pub public_key: EcdsaPublicKey,
    /// Big-endian private scalar.
    pub key_value: Vec<u8>,
}

impl Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("version", &self.version)
            .field("public_key", &self.public_key)
            .field("key_value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EcdsaKeyFormat {
    pub params: Option<EcdsaParams>,
}

// ============================================================================
// Ed25519
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519PublicKey {
    pub version: u32,
    pub key_value: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Ed25519PrivateKey {
    pub version: u32,
    #[zeroize(skip)]
    pub public_key: Ed25519PublicKey,
    /// 32-byte seed.
    pub key_value: Vec<u8>,
}

impl Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("version", &self.version)
            .field("public_key", &self.public_key)
            .field("key_value", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Every kind of key a manager can turn into a primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMaterial {
    Hmac(HmacKey),
    AesGcm(AesGcmKey),
    EcdsaPrivate(EcdsaPrivateKey),
    EcdsaPublic(EcdsaPublicKey),
    Ed25519Private(Ed25519PrivateKey),
    Ed25519Public(Ed25519PublicKey),
}

impl KeyMaterial {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            KeyMaterial::Hmac(_) => "HmacKey",
            KeyMaterial::AesGcm(_) => "AesGcmKey",
            KeyMaterial::EcdsaPrivate(_) => "EcdsaPrivateKey",
            KeyMaterial::EcdsaPublic(_) => "EcdsaPublicKey",
            KeyMaterial::Ed25519Private(_) => "Ed25519PrivateKey",
            KeyMaterial::Ed25519Public(_) => "Ed25519PublicKey",
        }
    }

    pub fn material_type(&self) -> KeyMaterialType {
        match self {
            KeyMaterial::Hmac(_) | KeyMaterial::AesGcm(_) => KeyMaterialType::Symmetric,
            KeyMaterial::EcdsaPrivate(_) | KeyMaterial::Ed25519Private(_) => {
                KeyMaterialType::AsymmetricPrivate
            }
            KeyMaterial::EcdsaPublic(_) | KeyMaterial::Ed25519Public(_) => {
                KeyMaterialType::AsymmetricPublic
            }
        }
    }
}

/// Parameters for generating a fresh key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyFormat {
    Hmac(HmacKeyFormat),
    AesGcm(AesGcmKeyFormat),
    Ecdsa(EcdsaKeyFormat),
    Ed25519,
}

impl KeyFormat {
    pub fn kind_name(&self) -> &'static str {
        match self {
            KeyFormat::Hmac(_) => "HmacKeyFormat",
            KeyFormat::AesGcm(_) => "AesGcmKeyFormat",
            KeyFormat::Ecdsa(_) => "EcdsaKeyFormat",
            KeyFormat::Ed25519 => "Ed25519KeyFormat",
        }
    }
}

/// Key material tagged with the type URL of the manager that understands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyData {
    pub type_url: String,
    pub value: KeyMaterial,
    pub key_material_type: KeyMaterialType,
}

impl KeyData {
    /// Wraps `value`, deriving the material type from the variant.
    pub fn new(type_url: impl Into<String>, value: KeyMaterial) -> Self {
        let key_material_type = value.material_type();
        Self {
            type_url: type_url.into(),
            value,
            key_material_type,
        }
    }
}

/// Recipe for generating a new key: which manager, which format, which framing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTemplate {
    pub type_url: String,
    pub format: KeyFormat,
    pub output_prefix_type: OutputPrefixType,
}
