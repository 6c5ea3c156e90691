//! Pre-made key templates.
//!
//! Every template uses TINK output prefixes.

use keystack_types::{
    AesGcmKeyFormat, EcdsaKeyFormat, EcdsaParams, EcdsaSignatureEncoding, EllipticCurve, HashType,
    HmacKeyFormat, HmacParams, KeyFormat, KeyTemplate, OutputPrefixType,
};

use crate::managers::{AES_GCM_TYPE_URL, ECDSA_PRIVATE_TYPE_URL, ED25519_PRIVATE_TYPE_URL, HMAC_TYPE_URL};

fn tink(type_url: &str, format: KeyFormat) -> KeyTemplate {
    KeyTemplate {
        type_url: type_url.to_string(),
        format,
        output_prefix_type: OutputPrefixType::Tink,
    }
}

fn hmac(key_size: u32, tag_size: u32, hash: HashType) -> KeyTemplate {
    tink(
        HMAC_TYPE_URL,
        KeyFormat::Hmac(HmacKeyFormat {
            params: HmacParams { hash, tag_size },
            key_size,
        }),
    )
}

fn aes_gcm(key_size: u32) -> KeyTemplate {
    tink(AES_GCM_TYPE_URL, KeyFormat::AesGcm(AesGcmKeyFormat { key_size }))
}

fn ecdsa(hash_type: HashType, curve: EllipticCurve, encoding: EcdsaSignatureEncoding) -> KeyTemplate {
    tink(
        ECDSA_PRIVATE_TYPE_URL,
        KeyFormat::Ecdsa(EcdsaKeyFormat {
            params: Some(EcdsaParams {
                hash_type,
                curve,
                encoding,
            }),
        }),
    )
}

/// HMAC-SHA256, 32-byte key, 16-byte tag.
pub fn hmac_sha256_half_size_tag() -> KeyTemplate {
    hmac(32, 16, HashType::Sha256)
}

/// HMAC-SHA256, 32-byte key, 32-byte tag.
pub fn hmac_sha256() -> KeyTemplate {
    hmac(32, 32, HashType::Sha256)
}

pub fn aes128_gcm() -> KeyTemplate {
    aes_gcm(16)
}

pub fn aes256_gcm() -> KeyTemplate {
    aes_gcm(32)
}

/// ECDSA P-256 with SHA-256, DER signatures.
pub fn ecdsa_p256() -> KeyTemplate {
    ecdsa(HashType::Sha256, EllipticCurve::NistP256, EcdsaSignatureEncoding::Der)
}

/// ECDSA P-384 with SHA-512, DER signatures.
pub fn ecdsa_p384() -> KeyTemplate {
    ecdsa(HashType::Sha512, EllipticCurve::NistP384, EcdsaSignatureEncoding::Der)
}

/// ECDSA P-521 with SHA-512, DER signatures.
pub fn ecdsa_p521() -> KeyTemplate {
    ecdsa(HashType::Sha512, EllipticCurve::NistP521, EcdsaSignatureEncoding::Der)
}

pub fn ecdsa_p256_ieee() -> KeyTemplate {
    ecdsa(
        HashType::Sha256,
        EllipticCurve::NistP256,
        EcdsaSignatureEncoding::IeeeP1363,
    )
}

pub fn ecdsa_p384_ieee() -> KeyTemplate {
    ecdsa(
        HashType::Sha512,
        EllipticCurve::NistP384,
        EcdsaSignatureEncoding::IeeeP1363,
    )
}

pub fn ecdsa_p521_ieee() -> KeyTemplate {
    ecdsa(
        HashType::Sha512,
        EllipticCurve::NistP521,
        EcdsaSignatureEncoding::IeeeP1363,
    )
}

pub fn ed25519() -> KeyTemplate {
    tink(ED25519_PRIVATE_TYPE_URL, KeyFormat::Ed25519)
}
