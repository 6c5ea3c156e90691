//! # keystack: Multi-key primitives for key rotation
//!
//! `keystack` lets an application hold one logical [`Mac`], signer,
//! verifier, or [`Aead`] that is backed by several keys at once. Output is
//! produced with the primary key and framed with a 5-byte key identifier;
//! input is routed back to the key that produced it, with RAW keys as a
//! fallback. Rotating keys never changes the caller's code.
//!
//! ## Architecture
//!
//! ```text
//!  KeysetHandle ──(Registry + KeyManagers)──► PrimitiveSetBuilder
//!                                                   │ build()
//!                                                   ▼
//!                                             PrimitiveSet (immutable)
//!                                                   │ new()
//!                                                   ▼
//!        MacWrapper / PublicKeySignWrapper / PublicKeyVerifyWrapper / AeadWrapper
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`format`] | Identifier derivation and output framing |
//! | [`primitive_set`] | Multi-key container and its builder |
//! | [`wrapper`] | Prefix-routed Mac / Sign / Verify / Aead wrappers |
//! | [`key_manager`] | KeyManager and KeyFactory traits |
//! | [`managers`] | Built-in HMAC, AES-GCM, ECDSA, and Ed25519 managers |
//! | [`registry`] | Explicit type URL to manager table |
//! | [`keyset`], [`keyset_handle`], [`keyset_manager`] | Keysets and rotation |
//! | [`templates`] | Ready-made key templates |
//!
//! ## Quick Start
//!
//! ```
//! use keystack::{KeysetHandle, Mac, Registry, templates};
//!
//! let registry = Registry::with_defaults().unwrap();
//! let handle = KeysetHandle::generate_new(&registry, &templates::hmac_sha256()).unwrap();
//! let mac = registry.new_mac(&handle).unwrap();
//!
//! let tag = mac.compute_mac(b"hello").unwrap();
//! assert_eq!(tag.len(), 5 + 32);
//! assert!(mac.verify_mac(&tag, b"hello").is_ok());
//! ```

pub mod format;
pub mod key_manager;
pub mod keyset;
pub mod keyset_handle;
pub mod keyset_manager;
pub mod managers;
pub mod primitive_set;
pub mod registry;
pub mod templates;
pub mod wrapper;

// Re-export primary types at crate root for convenience
pub use format::{
    IDENTIFIER_TAG, Identifier, LEGACY_START_BYTE, NON_RAW_PREFIX_SIZE, RAW_PREFIX, identifier_for,
};
pub use key_manager::{
    Capability, KeyFactory, KeyManager, Primitive, PrimitiveKind, PrivateKeyFactory,
};
pub use keyset::{Key, KeyInfo, Keyset, KeysetInfo, validate_keyset};
pub use keyset_handle::KeysetHandle;
pub use keyset_manager::KeysetManager;
pub use primitive_set::{Entry, EntryHandle, PrimitiveSet, PrimitiveSetBuilder};
pub use registry::Registry;
pub use wrapper::{AeadWrapper, MacWrapper, PublicKeySignWrapper, PublicKeyVerifyWrapper};

pub use keystack_crypto::{Aead, Mac, PublicKeySign, PublicKeyVerify};
pub use keystack_types::{
    KeyData, KeyId, KeyStatus, KeyTemplate, KeystackError, OutputPrefixType, Result,
};
