//! ECDSA over NIST P-256 and P-384.
//!
//! Messages are hashed with the key's [`HashType`] and the digest is signed
//! with the curve's prehash API, so the hash is a key parameter rather than
//! being fixed per curve. Signatures are emitted as DER or IEEE-P1363
//! according to the key's [`EcdsaSignatureEncoding`].
//!
//! Public keys are carried as big-endian affine coordinates. Leading zero
//! bytes are tolerated on input and the coordinates are left-padded to the
//! field size before decoding.

use keystack_types::{
    EcdsaParams, EcdsaSignatureEncoding, EllipticCurve, HashType, KeystackError, Result,
};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::{PublicKeySign, PublicKeyVerify};

/// Fresh ECDSA key material as stored in an `EcdsaPrivateKey`.
pub struct EcdsaKeyPair {
    /// Big-endian private scalar.
    pub private_scalar: Zeroizing<Vec<u8>>,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl std::fmt::Debug for EcdsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaKeyPair")
            .field("private_scalar", &"[REDACTED]")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

/// Checks that `params` name a combination this module can run.
///
/// # Errors
///
/// `Unimplemented` for NIST P-521, `InvalidArgument` for an unknown curve,
/// an unknown encoding, or a hash other than SHA-256/SHA-512.
pub fn check_params(params: &EcdsaParams) -> Result<()> {
    match params.curve {
        EllipticCurve::NistP256 | EllipticCurve::NistP384 => {}
        EllipticCurve::NistP521 => {
            return Err(KeystackError::unimplemented(
                "ECDSA over NIST_P521 is not available in this build",
            ));
        }
        EllipticCurve::UnknownCurve => {
            return Err(KeystackError::invalid_argument("Unsupported elliptic curve"));
        }
    }
    match params.hash_type {
        HashType::Sha256 | HashType::Sha512 => {}
        other => {
            return Err(KeystackError::invalid_argument(format!(
                "HashType '{other}' not supported for ECDSA"
            )));
        }
    }
    if params.encoding == EcdsaSignatureEncoding::UnknownEncoding {
        return Err(KeystackError::invalid_argument("Unsupported signature encoding"));
    }
    Ok(())
}

/// Generates a key pair on `curve`.
pub fn generate_key_pair(curve: EllipticCurve) -> Result<EcdsaKeyPair> {
    match curve {
        EllipticCurve::NistP256 => {
            let key = p256::ecdsa::SigningKey::random(&mut OsRng);
            let point = key.verifying_key().to_encoded_point(false);
            Ok(EcdsaKeyPair {
                private_scalar: Zeroizing::new(key.to_bytes().to_vec()),
                x: coordinate(point.x())?,
                y: coordinate(point.y())?,
            })
        }
        EllipticCurve::NistP384 => {
            let key = p384::ecdsa::SigningKey::random(&mut OsRng);
            let point = key.verifying_key().to_encoded_point(false);
            Ok(EcdsaKeyPair {
                private_scalar: Zeroizing::new(key.to_bytes().to_vec()),
                x: coordinate(point.x())?,
                y: coordinate(point.y())?,
            })
        }
        EllipticCurve::NistP521 => Err(KeystackError::unimplemented(
            "ECDSA over NIST_P521 is not available in this build",
        )),
        EllipticCurve::UnknownCurve => {
            Err(KeystackError::invalid_argument("Unsupported elliptic curve"))
        }
    }
}

fn coordinate<T: AsRef<[u8]>>(bytes: Option<&T>) -> Result<Vec<u8>> {
    bytes
        .map(|b| b.as_ref().to_vec())
        .ok_or_else(|| KeystackError::internal("encoded point is missing a coordinate"))
}

/// Strips leading zeros from a big-endian integer and left-pads it to `width`.
fn pad_to_width(bytes: &[u8], width: usize) -> Result<Vec<u8>> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > width {
        return Err(KeystackError::invalid_argument(format!(
            "value is {} bytes; the field holds {width}",
            significant.len()
        )));
    }
    let mut padded = vec![0u8; width - significant.len()];
    padded.extend_from_slice(significant);
    Ok(padded)
}

fn uncompressed_point(curve: EllipticCurve, x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
    let width = curve
        .field_size()
        .ok_or_else(|| KeystackError::invalid_argument("Unsupported elliptic curve"))?;
    let mut sec1 = Vec::with_capacity(1 + 2 * width);
    sec1.push(0x04);
    sec1.extend_from_slice(&pad_to_width(x, width)?);
    sec1.extend_from_slice(&pad_to_width(y, width)?);
    Ok(sec1)
}

fn digest(hash: HashType, data: &[u8]) -> Result<Vec<u8>> {
    match hash {
        HashType::Sha256 => Ok(Sha256::digest(data).to_vec()),
        HashType::Sha512 => Ok(Sha512::digest(data).to_vec()),
        other => Err(KeystackError::internal(format!(
            "ECDSA constructed with unsupported hash '{other}'"
        ))),
    }
}

// ============================================================================
// Signing
// ============================================================================

enum SigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
}

/// A single-key ECDSA signer.
pub struct EcdsaSignPrimitive {
    key: SigningKey,
    params: EcdsaParams,
}

impl std::fmt::Debug for EcdsaSignPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSignPrimitive")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl EcdsaSignPrimitive {
    /// Creates a signer from a big-endian private scalar.
    pub fn new(params: EcdsaParams, private_scalar: &[u8]) -> Result<Self> {
        check_params(&params)?;
        let invalid = |_| KeystackError::invalid_argument("invalid ECDSA private key");
        let key = match params.curve {
            EllipticCurve::NistP256 => {
                let scalar = Zeroizing::new(pad_to_width(private_scalar, 32)?);
                SigningKey::P256(p256::ecdsa::SigningKey::from_slice(&scalar).map_err(invalid)?)
            }
            EllipticCurve::NistP384 => {
                let scalar = Zeroizing::new(pad_to_width(private_scalar, 48)?);
                SigningKey::P384(p384::ecdsa::SigningKey::from_slice(&scalar).map_err(invalid)?)
            }
            _ => return Err(KeystackError::internal("curve passed validation but has no backend")),
        };
        Ok(Self { key, params })
    }
}

impl PublicKeySign for EcdsaSignPrimitive {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let prehash = digest(self.params.hash_type, data)?;
        let der = self.params.encoding == EcdsaSignatureEncoding::Der;
        let signing_failed = |_| KeystackError::internal("ECDSA signing failed");

        let signature = match &self.key {
            SigningKey::P256(key) => {
                let sig: p256::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(signing_failed)?;
                if der {
                    sig.to_der().as_bytes().to_vec()
                } else {
                    sig.to_bytes().to_vec()
                }
            }
            SigningKey::P384(key) => {
                let sig: p384::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(signing_failed)?;
                if der {
                    sig.to_der().as_bytes().to_vec()
                } else {
                    sig.to_bytes().to_vec()
                }
            }
        };
        Ok(signature)
    }
}

// ============================================================================
// Verification
// ============================================================================

enum VerifyingKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

/// A single-key ECDSA verifier.
pub struct EcdsaVerifyPrimitive {
    key: VerifyingKey,
    params: EcdsaParams,
}

impl std::fmt::Debug for EcdsaVerifyPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaVerifyPrimitive")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl EcdsaVerifyPrimitive {
    /// Creates a verifier from big-endian affine coordinates.
    pub fn new(params: EcdsaParams, x: &[u8], y: &[u8]) -> Result<Self> {
        check_params(&params)?;
        let sec1 = uncompressed_point(params.curve, x, y)?;
        let invalid = |_| KeystackError::invalid_argument("invalid ECDSA public key");
        let key = match params.curve {
            EllipticCurve::NistP256 => VerifyingKey::P256(
                p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(invalid)?,
            ),
            EllipticCurve::NistP384 => VerifyingKey::P384(
                p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(invalid)?,
            ),
            _ => return Err(KeystackError::internal("curve passed validation but has no backend")),
        };
        Ok(Self { key, params })
    }
}

impl PublicKeyVerify for EcdsaVerifyPrimitive {
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        let prehash = digest(self.params.hash_type, data)?;
        let der = self.params.encoding == EcdsaSignatureEncoding::Der;
        let malformed = |_| KeystackError::invalid_argument("malformed ECDSA signature");
        let rejected = |_| KeystackError::invalid_argument("ECDSA signature verification failed");

        match &self.key {
            VerifyingKey::P256(key) => {
                let sig = if der {
                    p256::ecdsa::Signature::from_der(signature)
                } else {
                    p256::ecdsa::Signature::from_slice(signature)
                }
                .map_err(malformed)?;
                key.verify_prehash(&prehash, &sig).map_err(rejected)
            }
            VerifyingKey::P384(key) => {
                let sig = if der {
                    p384::ecdsa::Signature::from_der(signature)
                } else {
                    p384::ecdsa::Signature::from_slice(signature)
                }
                .map_err(malformed)?;
                key.verify_prehash(&prehash, &sig).map_err(rejected)
            }
        }
    }
}
