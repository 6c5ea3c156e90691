//! [`PublicKeyVerify`] over a primitive set.

use keystack_crypto::PublicKeyVerify;
use keystack_types::{KeystackError, Result};
use tracing::debug;

use super::{accept_set, first_accepting, legacy_adjusted};
use crate::format::NON_RAW_PREFIX_SIZE;
use crate::primitive_set::PrimitiveSet;

const SET_NAME: &str = "public_key_verify_set";

/// Verifies signatures produced by any key in the set.
#[derive(Debug)]
pub struct PublicKeyVerifyWrapper {
    set: PrimitiveSet<dyn PublicKeyVerify>,
}

impl PublicKeyVerifyWrapper {
    /// Wraps `set`, which must be present and have a primary.
    pub fn new(set: impl Into<Option<PrimitiveSet<dyn PublicKeyVerify>>>) -> Result<Self> {
        let set = accept_set(set.into(), SET_NAME)?;
        debug!(keys = set.len(), "built verification wrapper");
        Ok(Self { set })
    }

    pub fn primitive_set(&self) -> &PrimitiveSet<dyn PublicKeyVerify> {
        &self.set
    }
}

impl PublicKeyVerify for PublicKeyVerifyWrapper {
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        if signature.len() <= NON_RAW_PREFIX_SIZE {
            return Err(KeystackError::invalid_argument("signature too short"));
        }
        first_accepting(&self.set, signature, |entry, body| {
            let input = legacy_adjusted(data, entry.output_prefix_type());
            entry.primitive().verify(body, &input)
        })
        .ok_or_else(|| KeystackError::invalid_argument("Invalid signature"))
    }
}
