//! # keystack-types: Core types for `Keystack`
//!
//! This crate contains shared types used across the `Keystack` system:
//! - Key identity ([`KeyId`], [`KeyStatus`], [`OutputPrefixType`])
//! - Algorithm parameters ([`HashType`], [`EllipticCurve`], [`EcdsaSignatureEncoding`])
//! - Key material as a closed sum type ([`KeyMaterial`], [`KeyFormat`], [`KeyData`])
//! - Key generation recipes ([`KeyTemplate`])
//! - Errors ([`KeystackError`])

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

mod error;
mod key;

pub use error::{KeystackError, Result};
pub use key::{
    AesGcmKey, AesGcmKeyFormat, EcdsaKeyFormat, EcdsaParams, EcdsaPrivateKey, EcdsaPublicKey,
    Ed25519PrivateKey, Ed25519PublicKey, HmacKey, HmacKeyFormat, HmacParams, KeyData, KeyFormat,
    KeyMaterial, KeyTemplate,
};

#[cfg(test)]
mod tests;

// ============================================================================
// Key Identity
// ============================================================================

/// Identifier of a key within a keyset.
///
/// Key ids are 32-bit values; for non-RAW keys they are embedded big-endian
/// in the output prefix, so they must be unique within a keyset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct KeyId(u32);

impl KeyId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Big-endian encoding used inside output prefixes.
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for KeyId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<KeyId> for u32 {
    fn from(id: KeyId) -> Self {
        id.0
    }
}

/// Lifecycle state of a key in a keyset.
///
/// Only `Enabled` keys are turned into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyStatus {
    #[default]
    Unknown,
    Enabled,
    Disabled,
    Destroyed,
}

impl Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyStatus::Unknown => "UNKNOWN",
            KeyStatus::Enabled => "ENABLED",
            KeyStatus::Disabled => "DISABLED",
            KeyStatus::Destroyed => "DESTROYED",
        };
        f.write_str(name)
    }
}

/// How a key's output is framed.
///
/// - `Raw`: no prefix.
/// - `Tink`, `Legacy`, `Crunchy`: 5-byte prefix (tag byte + big-endian key id).
///   `Legacy` additionally appends a zero byte to the input before the
///   primitive runs.
/// - `UnknownPrefix`: the unset wire value; never valid for a live key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputPrefixType {
    #[default]
    UnknownPrefix,
    Tink,
    Legacy,
    Raw,
    Crunchy,
}

impl Display for OutputPrefixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputPrefixType::UnknownPrefix => "UNKNOWN_PREFIX",
            OutputPrefixType::Tink => "TINK",
            OutputPrefixType::Legacy => "LEGACY",
            OutputPrefixType::Raw => "RAW",
            OutputPrefixType::Crunchy => "CRUNCHY",
        };
        f.write_str(name)
    }
}

/// What kind of secret (if any) a [`KeyData`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyMaterialType {
    #[default]
    UnknownKeymaterial,
    Symmetric,
    AsymmetricPrivate,
    AsymmetricPublic,
    Remote,
}

// ============================================================================
// Algorithm Parameters
// ============================================================================

/// Hash functions referenced by key parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HashType {
    #[default]
    UnknownHash,
    Sha1,
    Sha256,
    Sha512,
}

impl HashType {
    /// Digest length in bytes, `None` for `UnknownHash`.
    pub fn digest_size(self) -> Option<usize> {
        match self {
            HashType::UnknownHash => None,
            HashType::Sha1 => Some(20),
            HashType::Sha256 => Some(32),
            HashType::Sha512 => Some(64),
        }
    }
}

impl Display for HashType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HashType::UnknownHash => "UNKNOWN_HASH",
            HashType::Sha1 => "SHA1",
            HashType::Sha256 => "SHA256",
            HashType::Sha512 => "SHA512",
        };
        f.write_str(name)
    }
}

/// NIST prime curves supported by ECDSA keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EllipticCurve {
    #[default]
    UnknownCurve,
    NistP256,
    NistP384,
    NistP521,
}

impl EllipticCurve {
    /// Size of a field element (and of each affine coordinate) in bytes.
    pub fn field_size(self) -> Option<usize> {
        match self {
            EllipticCurve::UnknownCurve => None,
            EllipticCurve::NistP256 => Some(32),
            EllipticCurve::NistP384 => Some(48),
            EllipticCurve::NistP521 => Some(66),
        }
    }
}

impl Display for EllipticCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EllipticCurve::UnknownCurve => "UNKNOWN_CURVE",
            EllipticCurve::NistP256 => "NIST_P256",
            EllipticCurve::NistP384 => "NIST_P384",
            EllipticCurve::NistP521 => "NIST_P521",
        };
        f.write_str(name)
    }
}

/// Byte encoding of an ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EcdsaSignatureEncoding {
    #[default]
    UnknownEncoding,
    /// Fixed-width `r || s`.
    IeeeP1363,
    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
    Der,
}
