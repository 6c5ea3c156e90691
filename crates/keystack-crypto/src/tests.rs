//! Unit tests for keystack-crypto

use keystack_types::{EcdsaParams, EcdsaSignatureEncoding, EllipticCurve, HashType, KeystackError};
use proptest::prelude::*;
use test_case::test_case;

use crate::ecdsa::{check_params, generate_key_pair};
use crate::{
    Aead, AesGcmPrimitive, EcdsaSignPrimitive, EcdsaVerifyPrimitive, Ed25519SignPrimitive,
    Ed25519VerifyPrimitive, HmacPrimitive, Mac, PublicKeySign, PublicKeyVerify,
};

fn from_hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn ecdsa_params(curve: EllipticCurve, encoding: EcdsaSignatureEncoding) -> EcdsaParams {
    let hash_type = match curve {
        EllipticCurve::NistP256 => HashType::Sha256,
        _ => HashType::Sha512,
    };
    EcdsaParams {
        hash_type,
        curve,
        encoding,
    }
}

// ============================================================================
// HMAC Tests
// ============================================================================

// RFC 4231 test case 1
#[test_case(HashType::Sha256, "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"; "sha256")]
#[test_case(HashType::Sha512, "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"; "sha512")]
fn hmac_matches_rfc4231(hash: HashType, expected_hex: &str) {
    let expected = from_hex(expected_hex);
    let mac = HmacPrimitive::new(hash, expected.len(), &[0x0b; 20]).unwrap();

    let tag = mac.compute_mac(b"Hi There").unwrap();

    assert_eq!(tag, expected);
}

#[test]
fn hmac_truncates_to_leftmost_bytes() {
    let key = [0x0b; 20];
    let full = HmacPrimitive::new(HashType::Sha256, 32, &key).unwrap();
    let short = HmacPrimitive::new(HashType::Sha256, 16, &key).unwrap();

    let full_tag = full.compute_mac(b"Hi There").unwrap();
    let short_tag = short.compute_mac(b"Hi There").unwrap();

    assert_eq!(short_tag, full_tag[..16]);
    assert!(short.verify_mac(&short_tag, b"Hi There").is_ok());
}

#[test]
fn hmac_rejects_wrong_data_and_wrong_length() {
    let mac = HmacPrimitive::new(HashType::Sha256, 16, &[3u8; 32]).unwrap();
    let tag = mac.compute_mac(b"payload").unwrap();

    assert!(mac.verify_mac(&tag, b"other payload").is_err());
    assert!(mac.verify_mac(&tag[..15], b"payload").is_err());
}

#[test_case(HashType::Sha256, 16, 15; "key too short")]
#[test_case(HashType::Sha256, 9, 32; "tag too small")]
#[test_case(HashType::Sha256, 33, 32; "tag too big for sha256")]
#[test_case(HashType::Sha512, 65, 32; "tag too big for sha512")]
#[test_case(HashType::Sha1, 16, 32; "sha1 unsupported")]
#[test_case(HashType::UnknownHash, 16, 32; "unknown hash")]
fn hmac_construction_rejects(hash: HashType, tag_size: usize, key_len: usize) {
    let result = HmacPrimitive::new(hash, tag_size, &vec![1u8; key_len]);
    assert!(matches!(result, Err(KeystackError::InvalidArgument(_))));
}

#[test]
fn hmac_debug_hides_key() {
    let mac = HmacPrimitive::new(HashType::Sha256, 16, &[0xAB; 32]).unwrap();
    let debug = format!("{mac:?}");
    assert!(!debug.contains("171"));
    assert!(debug.contains("tag_size"));
}

// ============================================================================
// AES-GCM Tests
// ============================================================================

#[test_case(16; "aes128")]
#[test_case(32; "aes256")]
fn aes_gcm_roundtrip(key_len: usize) {
    let aead = AesGcmPrimitive::new(&vec![9u8; key_len]).unwrap();

    let ciphertext = aead.encrypt(b"secret", b"context").unwrap();

    assert_eq!(ciphertext.len(), 12 + 6 + 16);
    assert_eq!(aead.decrypt(&ciphertext, b"context").unwrap(), b"secret");
}

#[test]
fn aes_gcm_nonces_are_fresh() {
    let aead = AesGcmPrimitive::new(&[9u8; 16]).unwrap();
    let first = aead.encrypt(b"same", b"").unwrap();
    let second = aead.encrypt(b"same", b"").unwrap();
    assert_ne!(first, second);
}

#[test]
fn aes_gcm_rejects_wrong_associated_data() {
    let aead = AesGcmPrimitive::new(&[9u8; 32]).unwrap();
    let ciphertext = aead.encrypt(b"secret", b"context").unwrap();
    assert!(aead.decrypt(&ciphertext, b"other").is_err());
}

#[test]
fn aes_gcm_rejects_short_ciphertext() {
    let aead = AesGcmPrimitive::new(&[9u8; 16]).unwrap();
    let result = aead.decrypt(&[0u8; 27], b"");
    assert!(matches!(result, Err(KeystackError::InvalidArgument(_))));
}

#[test_case(0; "empty")]
#[test_case(15; "fifteen")]
#[test_case(24; "aes192 not offered")]
fn aes_gcm_rejects_key_sizes(len: usize) {
    assert!(AesGcmPrimitive::new(&vec![0u8; len]).is_err());
}

// ============================================================================
// ECDSA Tests
// ============================================================================

#[test_case(EllipticCurve::NistP256, EcdsaSignatureEncoding::Der; "p256 der")]
#[test_case(EllipticCurve::NistP256, EcdsaSignatureEncoding::IeeeP1363; "p256 ieee")]
#[test_case(EllipticCurve::NistP384, EcdsaSignatureEncoding::Der; "p384 der")]
#[test_case(EllipticCurve::NistP384, EcdsaSignatureEncoding::IeeeP1363; "p384 ieee")]
fn ecdsa_sign_then_verify(curve: EllipticCurve, encoding: EcdsaSignatureEncoding) {
    let params = ecdsa_params(curve, encoding);
    let pair = generate_key_pair(curve).unwrap();
    let signer = EcdsaSignPrimitive::new(params, &pair.private_scalar).unwrap();
    let verifier = EcdsaVerifyPrimitive::new(params, &pair.x, &pair.y).unwrap();

    let signature = signer.sign(b"message").unwrap();

    assert!(verifier.verify(&signature, b"message").is_ok());
    assert!(verifier.verify(&signature, b"tampered").is_err());
}

#[test]
fn ecdsa_ieee_signature_is_fixed_width() {
    let params = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::IeeeP1363);
    let pair = generate_key_pair(EllipticCurve::NistP256).unwrap();
    let signer = EcdsaSignPrimitive::new(params, &pair.private_scalar).unwrap();

    assert_eq!(signer.sign(b"message").unwrap().len(), 64);
}

#[test]
fn ecdsa_encoding_mismatch_fails() {
    let der = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::Der);
    let ieee = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::IeeeP1363);
    let pair = generate_key_pair(EllipticCurve::NistP256).unwrap();
    let signer = EcdsaSignPrimitive::new(der, &pair.private_scalar).unwrap();
    let verifier = EcdsaVerifyPrimitive::new(ieee, &pair.x, &pair.y).unwrap();

    let signature = signer.sign(b"message").unwrap();

    assert!(verifier.verify(&signature, b"message").is_err());
}

#[test]
fn ecdsa_accepts_coordinates_with_leading_zero() {
    let params = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::Der);
    let pair = generate_key_pair(EllipticCurve::NistP256).unwrap();
    let mut x = vec![0u8];
    x.extend_from_slice(&pair.x);

    assert!(EcdsaVerifyPrimitive::new(params, &x, &pair.y).is_ok());
}

#[test]
fn ecdsa_rejects_point_off_curve() {
    let params = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::Der);
    let result = EcdsaVerifyPrimitive::new(params, &[1u8; 32], &[2u8; 32]);
    assert!(matches!(result, Err(KeystackError::InvalidArgument(_))));
}

#[test]
fn ecdsa_p521_is_unimplemented() {
    let params = EcdsaParams {
        hash_type: HashType::Sha512,
        curve: EllipticCurve::NistP521,
        encoding: EcdsaSignatureEncoding::Der,
    };
    assert!(matches!(check_params(&params), Err(KeystackError::Unimplemented(_))));
    assert!(matches!(
        generate_key_pair(EllipticCurve::NistP521),
        Err(KeystackError::Unimplemented(_))
    ));
}

#[test]
fn ecdsa_unknown_encoding_rejected() {
    let params = ecdsa_params(EllipticCurve::NistP256, EcdsaSignatureEncoding::UnknownEncoding);
    assert!(matches!(check_params(&params), Err(KeystackError::InvalidArgument(_))));
}

// ============================================================================
// Ed25519 Tests
// ============================================================================

#[test]
fn ed25519_sign_then_verify() {
    let (seed, public_key) = crate::ed25519::generate_key_pair();
    let signer = Ed25519SignPrimitive::new(&seed).unwrap();
    let verifier = Ed25519VerifyPrimitive::new(&public_key).unwrap();

    let signature = signer.sign(b"message").unwrap();

    assert_eq!(signature.len(), 64);
    assert_eq!(signer.public_key(), public_key);
    assert!(verifier.verify(&signature, b"message").is_ok());
    assert!(verifier.verify(&signature, b"other").is_err());
    assert!(verifier.verify(&signature[..63], b"message").is_err());
}

#[test]
fn ed25519_signatures_are_deterministic() {
    let signer = Ed25519SignPrimitive::new(&[5u8; 32]).unwrap();
    assert_eq!(signer.sign(b"m").unwrap(), signer.sign(b"m").unwrap());
}

#[test]
fn ed25519_rejects_bad_key_lengths() {
    assert!(Ed25519SignPrimitive::new(&[0u8; 31]).is_err());
    assert!(Ed25519VerifyPrimitive::new(&[0u8; 33]).is_err());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #[test]
    fn hmac_verifies_own_tags(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let mac = HmacPrimitive::new(HashType::Sha512, 32, &[7u8; 32]).unwrap();
        let tag = mac.compute_mac(&data).unwrap();
        prop_assert!(mac.verify_mac(&tag, &data).is_ok());
    }

    #[test]
    fn hmac_flipped_bit_fails(
        data in prop::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mac = HmacPrimitive::new(HashType::Sha256, 16, &[7u8; 32]).unwrap();
        let mut tag = mac.compute_mac(&data).unwrap();
        let i = index.index(tag.len());
        tag[i] ^= 1 << bit;
        prop_assert!(mac.verify_mac(&tag, &data).is_err());
    }

    #[test]
    fn aes_gcm_roundtrips(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        aad in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let aead = AesGcmPrimitive::new(&[1u8; 32]).unwrap();
        let ciphertext = aead.encrypt(&plaintext, &aad).unwrap();
        prop_assert_eq!(aead.decrypt(&ciphertext, &aad).unwrap(), plaintext);
    }
}
