//! Ed25519 signatures via `ed25519-dalek`.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use keystack_types::{KeystackError, Result};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::{PublicKeySign, PublicKeyVerify};

/// Seed and public key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Generates a fresh `(seed, public_key)` pair.
pub fn generate_key_pair() -> (Zeroizing<Vec<u8>>, Vec<u8>) {
    let key = SigningKey::generate(&mut OsRng);
    let seed = Zeroizing::new(key.to_bytes().to_vec());
    (seed, key.verifying_key().to_bytes().to_vec())
}

fn fixed_key(bytes: &[u8], what: &str) -> Result<[u8; KEY_SIZE]> {
    bytes.try_into().map_err(|_| {
        KeystackError::invalid_argument(format!(
            "Ed25519 {what} is {} bytes; expected {KEY_SIZE}",
            bytes.len()
        ))
    })
}

/// A single-key Ed25519 signer.
pub struct Ed25519SignPrimitive {
    key: SigningKey,
}

// Manual Debug implementation to avoid exposing key material
impl std::fmt::Debug for Ed25519SignPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519SignPrimitive")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Ed25519SignPrimitive {
    /// Creates a signer from a 32-byte seed.
    pub fn new(seed: &[u8]) -> Result<Self> {
        let seed = Zeroizing::new(fixed_key(seed, "private key")?);
        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    /// The matching 32-byte public key.
    pub fn public_key(&self) -> Vec<u8> {
        self.key.verifying_key().to_bytes().to_vec()
    }
}

impl PublicKeySign for Ed25519SignPrimitive {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.key.sign(data).to_bytes().to_vec())
    }
}

/// A single-key Ed25519 verifier.
#[derive(Debug)]
pub struct Ed25519VerifyPrimitive {
    key: VerifyingKey,
}

impl Ed25519VerifyPrimitive {
    /// Creates a verifier from a 32-byte public key.
    pub fn new(public_key: &[u8]) -> Result<Self> {
        let bytes = fixed_key(public_key, "public key")?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| KeystackError::invalid_argument("invalid Ed25519 public key"))?;
        Ok(Self { key })
    }
}

impl PublicKeyVerify for Ed25519VerifyPrimitive {
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        if signature.len() != SIGNATURE_SIZE {
            return Err(KeystackError::invalid_argument(format!(
                "Ed25519 signature is {} bytes; expected {SIGNATURE_SIZE}",
                signature.len()
            )));
        }
        let signature = Signature::from_slice(signature)
            .map_err(|_| KeystackError::invalid_argument("malformed Ed25519 signature"))?;
        self.key
            .verify(data, &signature)
            .map_err(|_| KeystackError::invalid_argument("Ed25519 signature verification failed"))
    }
}
