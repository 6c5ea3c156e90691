//! AES-GCM authenticated encryption.
//!
//! Output layout: `nonce (12) || ciphertext || tag (16)`. Nonces are drawn
//! from the OS CSPRNG per call, so the same key may encrypt many messages.

use ::aes_gcm::{
    Aes128Gcm, Aes256Gcm, Nonce,
    aead::{Aead as AeadCipher, KeyInit, Payload},
};
use keystack_types::{KeystackError, Result};

use crate::Aead;
use crate::random::random_bytes;

/// GCM nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

enum Cipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

/// A single-key AES-GCM AEAD.
pub struct AesGcmPrimitive {
    cipher: Cipher,
}

impl std::fmt::Debug for AesGcmPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key_bits = match self.cipher {
            Cipher::Aes128(_) => 128,
            Cipher::Aes256(_) => 256,
        };
        f.debug_struct("AesGcmPrimitive")
            .field("key_bits", &key_bits)
            .finish_non_exhaustive()
    }
}

impl AesGcmPrimitive {
    /// Creates an AEAD from a 16- or 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self> {
        let backend_error = |_| KeystackError::internal("AES-GCM backend rejected the key");
        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(backend_error)?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(backend_error)?),
            other => {
                return Err(KeystackError::invalid_argument(format!(
                    "invalid AES-GCM key size {other}; expected 16 or 32 bytes"
                )));
            }
        };
        Ok(Self { cipher })
    }
}

impl Aead for AesGcmPrimitive {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let nonce = random_bytes(NONCE_SIZE);
        let nonce_obj = Nonce::from_slice(&nonce);
        let payload = Payload {
            msg: plaintext,
            aad: associated_data,
        };

        let sealed = match &self.cipher {
            Cipher::Aes128(cipher) => cipher.encrypt(nonce_obj, payload),
            Cipher::Aes256(cipher) => cipher.encrypt(nonce_obj, payload),
        }
        .map_err(|_| KeystackError::internal("AES-GCM encryption failed"))?;

        let mut output = Vec::with_capacity(NONCE_SIZE + sealed.len());
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&sealed);
        Ok(output)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(KeystackError::invalid_argument("ciphertext too short"));
        }
        let (nonce, sealed) = ciphertext.split_at(NONCE_SIZE);
        let nonce_obj = Nonce::from_slice(nonce);
        let payload = Payload {
            msg: sealed,
            aad: associated_data,
        };

        match &self.cipher {
            Cipher::Aes128(cipher) => cipher.decrypt(nonce_obj, payload),
            Cipher::Aes256(cipher) => cipher.decrypt(nonce_obj, payload),
        }
        .map_err(|_| {
            KeystackError::invalid_argument("authentication failed: ciphertext tampered or wrong key")
        })
    }
}
