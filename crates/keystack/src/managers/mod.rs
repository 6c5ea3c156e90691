//! Built-in key managers.
//!
//! | Manager | Key material | Primitive |
//! |---------|--------------|-----------|
//! | [`HmacKeyManager`] | `HmacKey` | [`Mac`](keystack_crypto::Mac) |
//! | [`AesGcmKeyManager`] | `AesGcmKey` | [`Aead`](keystack_crypto::Aead) |
//! | [`EcdsaSignKeyManager`] | `EcdsaPrivateKey` | [`PublicKeySign`](keystack_crypto::PublicKeySign) |
//! | [`EcdsaVerifyKeyManager`] | `EcdsaPublicKey` | [`PublicKeyVerify`](keystack_crypto::PublicKeyVerify) |
//! | [`Ed25519SignKeyManager`] | `Ed25519PrivateKey` | [`PublicKeySign`](keystack_crypto::PublicKeySign) |
//! | [`Ed25519VerifyKeyManager`] | `Ed25519PublicKey` | [`PublicKeyVerify`](keystack_crypto::PublicKeyVerify) |

use keystack_types::{KeyFormat, KeyMaterial, KeystackError};

mod aes_gcm;
mod ecdsa;
mod ed25519;
mod hmac;

pub use self::aes_gcm::AesGcmKeyManager;
pub use self::ecdsa::{EcdsaSignKeyManager, EcdsaVerifyKeyManager, validate_ecdsa_params};
pub use self::ed25519::{Ed25519SignKeyManager, Ed25519VerifyKeyManager};
pub use self::hmac::HmacKeyManager;

/// Common prefix of every built-in type URL.
pub const TYPE_URL_PREFIX: &str = "type.keystack.dev/keystack.";

pub const HMAC_TYPE_URL: &str = "type.keystack.dev/keystack.HmacKey";
pub const AES_GCM_TYPE_URL: &str = "type.keystack.dev/keystack.AesGcmKey";
pub const ECDSA_PRIVATE_TYPE_URL: &str = "type.keystack.dev/keystack.EcdsaPrivateKey";
pub const ECDSA_PUBLIC_TYPE_URL: &str = "type.keystack.dev/keystack.EcdsaPublicKey";
pub const ED25519_PRIVATE_TYPE_URL: &str = "type.keystack.dev/keystack.Ed25519PrivateKey";
pub const ED25519_PUBLIC_TYPE_URL: &str = "type.keystack.dev/keystack.Ed25519PublicKey";

/// Current version of every built-in key type.
pub const KEY_VERSION: u32 = 0;

fn wrong_material(expected: &str, actual: &KeyMaterial) -> KeystackError {
    KeystackError::invalid_argument(format!(
        "expected {expected} key material, got {}",
        actual.kind_name()
    ))
}

fn wrong_format(expected: &str, actual: &KeyFormat) -> KeystackError {
    KeystackError::invalid_argument(format!(
        "expected {expected}, got {}",
        actual.kind_name()
    ))
}

fn public_key_factory_error(sign_manager: &str) -> KeystackError {
    KeystackError::unimplemented(format!(
        "Operation not supported for public keys, please use the {sign_manager}."
    ))
}
