//! [`PublicKeySign`] over a primitive set.

use keystack_crypto::PublicKeySign;
use keystack_types::Result;
use tracing::debug;

use super::{accept_set, legacy_adjusted, primary_of};
use crate::format::frame;
use crate::primitive_set::PrimitiveSet;

const SET_NAME: &str = "public_key_sign_set";

/// Signs with the primary key and frames the signature with its identifier.
#[derive(Debug)]
pub struct PublicKeySignWrapper {
    set: PrimitiveSet<dyn PublicKeySign>,
}

impl PublicKeySignWrapper {
    /// Wraps `set`, which must be present and have a primary.
    pub fn new(set: impl Into<Option<PrimitiveSet<dyn PublicKeySign>>>) -> Result<Self> {
        let set = accept_set(set.into(), SET_NAME)?;
        debug!(keys = set.len(), "built signing wrapper");
        Ok(Self { set })
    }

    pub fn primitive_set(&self) -> &PrimitiveSet<dyn PublicKeySign> {
        &self.set
    }
}

impl PublicKeySign for PublicKeySignWrapper {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let primary = primary_of(&self.set, SET_NAME)?;
        let input = legacy_adjusted(data, primary.output_prefix_type());
        let signature = primary.primitive().sign(&input)?;
        Ok(frame(primary.identifier(), &signature))
    }
}
