//! HMAC with truncated tags.
//!
//! Wraps the `hmac` crate over SHA-256 or SHA-512. Tags are the leftmost
//! `tag_size` bytes of the full HMAC output, and verification compares in
//! constant time.

use ::hmac::{Hmac, Mac as HmacMac};
use keystack_types::{HashType, KeystackError, Result};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::Mac;

/// Smallest accepted HMAC key, in bytes.
pub const MIN_KEY_SIZE: usize = 16;

/// Smallest accepted truncated tag, in bytes.
pub const MIN_TAG_SIZE: usize = 10;

/// A single-key HMAC.
pub struct HmacPrimitive {
    hash: HashType,
    tag_size: usize,
    key: Zeroizing<Vec<u8>>,
}

// Manual Debug implementation to avoid exposing key material
impl std::fmt::Debug for HmacPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacPrimitive")
            .field("hash", &self.hash)
            .field("tag_size", &self.tag_size)
            .finish_non_exhaustive()
    }
}

impl HmacPrimitive {
    /// Creates an HMAC over `hash` producing `tag_size`-byte tags.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the key is shorter than [`MIN_KEY_SIZE`], the tag
    /// is shorter than [`MIN_TAG_SIZE`] or longer than the digest, or the
    /// hash is not SHA-256/SHA-512.
    pub fn new(hash: HashType, tag_size: usize, key: &[u8]) -> Result<Self> {
        if key.len() < MIN_KEY_SIZE {
            return Err(KeystackError::invalid_argument(format!(
                "HMAC key is {} bytes; at least {MIN_KEY_SIZE} are required",
                key.len()
            )));
        }
        if tag_size < MIN_TAG_SIZE {
            return Err(KeystackError::invalid_argument(format!(
                "tag size {tag_size} is too small"
            )));
        }
        let digest_size = match hash {
            HashType::Sha256 | HashType::Sha512 => hash.digest_size().unwrap_or_default(),
            other => {
                return Err(KeystackError::invalid_argument(format!(
                    "HashType '{other}' not supported for HMAC"
                )));
            }
        };
        if tag_size > digest_size {
            return Err(KeystackError::invalid_argument(format!(
                "tag size {tag_size} is too big for HashType '{hash}'"
            )));
        }

        Ok(Self {
            hash,
            tag_size,
            key: Zeroizing::new(key.to_vec()),
        })
    }

    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    fn full_tag(&self, data: &[u8]) -> Result<Vec<u8>> {
        let backend_error = |_| KeystackError::internal("HMAC backend rejected the key");
        match self.hash {
            HashType::Sha256 => {
                let mut mac =
                    <Hmac<Sha256> as HmacMac>::new_from_slice(&self.key).map_err(backend_error)?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HashType::Sha512 => {
                let mut mac =
                    <Hmac<Sha512> as HmacMac>::new_from_slice(&self.key).map_err(backend_error)?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            other => Err(KeystackError::internal(format!(
                "HMAC constructed with unsupported hash '{other}'"
            ))),
        }
    }
}

impl Mac for HmacPrimitive {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut tag = self.full_tag(data)?;
        tag.truncate(self.tag_size);
        Ok(tag)
    }

    fn verify_mac(&self, mac: &[u8], data: &[u8]) -> Result<()> {
        if mac.len() != self.tag_size {
            return Err(KeystackError::invalid_argument("incorrect tag size"));
        }
        let expected = self.compute_mac(data)?;
        if bool::from(expected.as_slice().ct_eq(mac)) {
            Ok(())
        } else {
            Err(KeystackError::invalid_argument("HMAC verification failed"))
        }
    }
}
