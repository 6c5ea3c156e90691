//! [`Aead`] over a primitive set.
//!
//! AEAD output carries the identifier prefix but LEGACY keys get no input
//! suffix: the plaintext and associated data reach the primitive unchanged.

use keystack_crypto::Aead;
use keystack_types::{KeystackError, Result};
use tracing::debug;

use super::{accept_set, first_accepting, primary_of};
use crate::format::frame;
use crate::primitive_set::PrimitiveSet;

const SET_NAME: &str = "aead_set";

#[derive(Debug)]
pub struct AeadWrapper {
    set: PrimitiveSet<dyn Aead>,
}

impl AeadWrapper {
    /// Wraps `set`, which must be present and have a primary.
    pub fn new(set: impl Into<Option<PrimitiveSet<dyn Aead>>>) -> Result<Self> {
        let set = accept_set(set.into(), SET_NAME)?;
        debug!(keys = set.len(), "built aead wrapper");
        Ok(Self { set })
    }

    pub fn primitive_set(&self) -> &PrimitiveSet<dyn Aead> {
        &self.set
    }
}

impl Aead for AeadWrapper {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let primary = primary_of(&self.set, SET_NAME)?;
        let ciphertext = primary.primitive().encrypt(plaintext, associated_data)?;
        Ok(frame(primary.identifier(), &ciphertext))
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        first_accepting(&self.set, ciphertext, |entry, body| {
            entry.primitive().decrypt(body, associated_data)
        })
        .ok_or_else(|| KeystackError::invalid_argument("decryption failed"))
    }
}
