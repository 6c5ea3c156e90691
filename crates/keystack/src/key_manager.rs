//! The per-algorithm plug-in seam.
//!
//! A [`KeyManager`] turns [`KeyData`] of one type URL into a ready primitive,
//! and exposes a [`KeyFactory`] that mints fresh key material. Managers for
//! private keys also expose a [`PrivateKeyFactory`] that extracts the
//! matching public key.
//!
//! Managers return a [`Primitive`], a closed enum over the capability
//! traits. The [`Capability`] trait lets the registry ask for a specific
//! trait object and get a typed error when a manager produces another kind.

use std::fmt::{self, Debug, Display};

use keystack_crypto::{Aead, Mac, PublicKeySign, PublicKeyVerify};
use keystack_types::{KeyData, KeyFormat, KeyMaterial, KeystackError, Result};

/// The capability a manager's primitives implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Mac,
    Aead,
    PublicKeySign,
    PublicKeyVerify,
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Mac => "Mac",
            PrimitiveKind::Aead => "Aead",
            PrimitiveKind::PublicKeySign => "PublicKeySign",
            PrimitiveKind::PublicKeyVerify => "PublicKeyVerify",
        };
        f.write_str(name)
    }
}

/// A primitive produced by a key manager.
pub enum Primitive {
    Mac(Box<dyn Mac>),
    Aead(Box<dyn Aead>),
    PublicKeySign(Box<dyn PublicKeySign>),
    PublicKeyVerify(Box<dyn PublicKeyVerify>),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Mac(_) => PrimitiveKind::Mac,
            Primitive::Aead(_) => PrimitiveKind::Aead,
            Primitive::PublicKeySign(_) => PrimitiveKind::PublicKeySign,
            Primitive::PublicKeyVerify(_) => PrimitiveKind::PublicKeyVerify,
        }
    }
}

impl Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Primitive").field(&self.kind()).finish()
    }
}

/// Generates key material.
pub trait KeyFactory: Send + Sync {
    /// Generates a new key as described by `format`.
    fn new_key(&self, format: &KeyFormat) -> Result<KeyMaterial>;

    /// Generates a new key and wraps it with the manager's type URL.
    fn new_key_data(&self, format: &KeyFormat) -> Result<KeyData>;
}

/// A [`KeyFactory`] for private keys.
pub trait PrivateKeyFactory: KeyFactory {
    /// Returns the public half of `private_key_data`.
    fn public_key_data(&self, private_key_data: &KeyData) -> Result<KeyData>;
}

/// Turns key data of a single type URL into primitives.
pub trait KeyManager: Send + Sync {
    /// The type URL this manager handles.
    fn key_type(&self) -> &str;

    /// Highest key version this manager accepts.
    fn version(&self) -> u32;

    fn primitive_kind(&self) -> PrimitiveKind;

    /// Validates `key_data` and builds a primitive from it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an unsupported type URL, the wrong kind of key
    /// material, or key parameters that fail validation.
    fn primitive(&self, key_data: &KeyData) -> Result<Primitive>;

    fn key_factory(&self) -> &dyn KeyFactory;

    /// The factory that extracts public keys, for private-key managers.
    fn private_key_factory(&self) -> Option<&dyn PrivateKeyFactory> {
        None
    }

    fn does_support(&self, type_url: &str) -> bool {
        type_url == self.key_type()
    }

    /// Identifies the implementation, so re-registering the same manager can
    /// be told apart from registering a different one.
    fn manager_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Rejects key data this manager was not built for.
pub fn ensure_supported(manager: &dyn KeyManager, key_data: &KeyData) -> Result<()> {
    if manager.does_support(&key_data.type_url) {
        Ok(())
    } else {
        Err(KeystackError::invalid_argument(format!(
            "Key type '{}' is not supported by this manager.",
            key_data.type_url
        )))
    }
}

/// Rejects keys newer than the manager understands.
pub fn validate_version(candidate: u32, max_expected: u32) -> Result<()> {
    if candidate > max_expected {
        return Err(KeystackError::invalid_argument(format!(
            "Key has version '{candidate}'; only keys with version in range [0..{max_expected}] are supported."
        )));
    }
    Ok(())
}

// ============================================================================
// Typed extraction
// ============================================================================

/// A capability trait object the registry can hand out.
pub trait Capability: Send + Sync {
    const KIND: PrimitiveKind;

    /// Unwraps `primitive` if it has this capability.
    fn from_primitive(primitive: Primitive) -> Result<Box<Self>>;
}

fn kind_mismatch(expected: PrimitiveKind, primitive: &Primitive) -> KeystackError {
    KeystackError::invalid_argument(format!(
        "expected a {expected} primitive, the key manager produced {}",
        primitive.kind()
    ))
}

impl Capability for dyn Mac {
    const KIND: PrimitiveKind = PrimitiveKind::Mac;

    fn from_primitive(primitive: Primitive) -> Result<Box<Self>> {
        match primitive {
            Primitive::Mac(mac) => Ok(mac),
            other => Err(kind_mismatch(Self::KIND, &other)),
        }
    }
}

impl Capability for dyn Aead {
    const KIND: PrimitiveKind = PrimitiveKind::Aead;

    fn from_primitive(primitive: Primitive) -> Result<Box<Self>> {
        match primitive {
            Primitive::Aead(aead) => Ok(aead),
            other => Err(kind_mismatch(Self::KIND, &other)),
        }
    }
}

impl Capability for dyn PublicKeySign {
    const KIND: PrimitiveKind = PrimitiveKind::PublicKeySign;

    fn from_primitive(primitive: Primitive) -> Result<Box<Self>> {
        match primitive {
            Primitive::PublicKeySign(signer) => Ok(signer),
            other => Err(kind_mismatch(Self::KIND, &other)),
        }
    }
}

impl Capability for dyn PublicKeyVerify {
    const KIND: PrimitiveKind = PrimitiveKind::PublicKeyVerify;

    fn from_primitive(primitive: Primitive) -> Result<Box<Self>> {
        match primitive {
            Primitive::PublicKeyVerify(verifier) => Ok(verifier),
            other => Err(kind_mismatch(Self::KIND, &other)),
        }
    }
}
