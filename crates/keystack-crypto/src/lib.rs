//! # keystack-crypto: Single-key primitives for `Keystack`
//!
//! This crate defines the capability traits every keyset-backed object
//! implements, and the concrete single-key algorithms behind them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`primitives`] | Capability traits: [`Mac`], [`PublicKeySign`], [`PublicKeyVerify`], [`Aead`] |
//! | [`hmac`] | HMAC-SHA256 / HMAC-SHA512 with truncated tags |
//! | [`aes_gcm`] | AES-128/256-GCM with random nonces |
//! | [`ecdsa`] | ECDSA over NIST P-256 / P-384 (DER or IEEE-P1363) |
//! | [`ed25519`] | Ed25519 signatures |
//! | [`random`] | OS-backed randomness |
//!
//! ## Quick Start
//!
//! ```
//! use keystack_crypto::{HmacPrimitive, Mac};
//! use keystack_types::HashType;
//!
//! let key = [7u8; 32];
//! let mac = HmacPrimitive::new(HashType::Sha256, 16, &key).unwrap();
//!
//! let tag = mac.compute_mac(b"payload").unwrap();
//! assert_eq!(tag.len(), 16);
//! assert!(mac.verify_mac(&tag, b"payload").is_ok());
//! ```

pub mod aes_gcm;
pub mod ecdsa;
pub mod ed25519;
pub mod hmac;
pub mod primitives;
pub mod random;

// Re-export primary types at crate root for convenience
pub use self::aes_gcm::AesGcmPrimitive;
pub use self::ecdsa::{EcdsaSignPrimitive, EcdsaVerifyPrimitive};
pub use self::ed25519::{Ed25519SignPrimitive, Ed25519VerifyPrimitive};
pub use self::hmac::HmacPrimitive;
pub use self::primitives::{Aead, Mac, PublicKeySign, PublicKeyVerify};

#[cfg(test)]
mod tests;
