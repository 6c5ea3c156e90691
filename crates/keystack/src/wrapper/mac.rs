//! [`Mac`] over a primitive set.

use keystack_crypto::Mac;
use keystack_types::{KeystackError, Result};
use tracing::debug;

use super::{accept_set, first_accepting, legacy_adjusted, primary_of};
use crate::format::{NON_RAW_PREFIX_SIZE, frame};
use crate::primitive_set::PrimitiveSet;

const SET_NAME: &str = "mac_set";

/// A [`Mac`] backed by every enabled key of a keyset.
///
/// Tags are `identifier ++ tag` of the primary key. Verification accepts a
/// tag from any key in the set.
#[derive(Debug)]
pub struct MacWrapper {
    set: PrimitiveSet<dyn Mac>,
}

impl MacWrapper {
    /// Wraps `set`, which must be present and have a primary.
    ///
    /// # Errors
    ///
    /// `Internal` if `set` is `None`, `InvalidArgument` if it has no primary.
    pub fn new(set: impl Into<Option<PrimitiveSet<dyn Mac>>>) -> Result<Self> {
        let set = accept_set(set.into(), SET_NAME)?;
        debug!(keys = set.len(), "built mac wrapper");
        Ok(Self { set })
    }

    pub fn primitive_set(&self) -> &PrimitiveSet<dyn Mac> {
        &self.set
    }
}

impl Mac for MacWrapper {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        let primary = primary_of(&self.set, SET_NAME)?;
        let input = legacy_adjusted(data, primary.output_prefix_type());
        let tag = primary.primitive().compute_mac(&input)?;
        Ok(frame(primary.identifier(), &tag))
    }

    fn verify_mac(&self, mac: &[u8], data: &[u8]) -> Result<()> {
        if mac.len() <= NON_RAW_PREFIX_SIZE {
            return Err(KeystackError::invalid_argument("tag too short"));
        }
        first_accepting(&self.set, mac, |entry, tag| {
            let input = legacy_adjusted(data, entry.output_prefix_type());
            entry.primitive().verify_mac(tag, &input)
        })
        .ok_or_else(|| KeystackError::invalid_argument("verification failed"))
    }
}
