//! Capability traits.
//!
//! Each trait is one cryptographic capability. Single-key algorithms in this
//! crate implement them, and so do the keyset wrappers in `keystack`, so a
//! caller never needs to know how many keys back the object it holds.
//!
//! All traits require `Send + Sync`: a finished primitive is read-only and
//! may be shared across threads without further synchronization.

use keystack_types::Result;

/// Message authentication codes.
pub trait Mac: Send + Sync {
    /// Computes a tag over `data`.
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Checks `mac` against `data`; `Ok(())` only when it is valid.
    fn verify_mac(&self, mac: &[u8], data: &[u8]) -> Result<()>;
}

/// Digital signature creation.
pub trait PublicKeySign: Send + Sync {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Digital signature verification.
pub trait PublicKeyVerify: Send + Sync {
    /// `Ok(())` only when `signature` is valid for `data`.
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()>;
}

/// Authenticated encryption with associated data.
pub trait Aead: Send + Sync {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;
}
