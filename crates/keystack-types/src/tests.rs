//! Unit tests for keystack-types

use test_case::test_case;

use crate::{
    EllipticCurve, HashType, HmacKey, HmacParams, KeyData, KeyId, KeyMaterial, KeyMaterialType,
    KeyStatus, KeystackError, OutputPrefixType,
};

// ============================================================================
// KeyId Tests
// ============================================================================

#[test]
fn key_id_big_endian_bytes() {
    let id = KeyId::new(1_234_567);
    assert_eq!(id.to_be_bytes(), [0x00, 0x12, 0xD6, 0x87]);
}

#[test]
fn key_id_roundtrips_through_u32() {
    let id = KeyId::from(42);
    assert_eq!(u32::from(id), 42);
    assert_eq!(id.to_string(), "42");
}

// ============================================================================
// Enum Tests
// ============================================================================

#[test_case(HashType::Sha1 => Some(20); "sha1")]
#[test_case(HashType::Sha256 => Some(32); "sha256")]
#[test_case(HashType::Sha512 => Some(64); "sha512")]
#[test_case(HashType::UnknownHash => None; "unknown")]
fn hash_digest_sizes(hash: HashType) -> Option<usize> {
    hash.digest_size()
}

#[test_case(EllipticCurve::NistP256 => Some(32); "p256")]
#[test_case(EllipticCurve::NistP384 => Some(48); "p384")]
#[test_case(EllipticCurve::NistP521 => Some(66); "p521")]
#[test_case(EllipticCurve::UnknownCurve => None; "unknown")]
fn curve_field_sizes(curve: EllipticCurve) -> Option<usize> {
    curve.field_size()
}

#[test]
fn prefix_type_serializes_as_wire_name() {
    let json = serde_json::to_string(&OutputPrefixType::Legacy).unwrap();
    assert_eq!(json, "\"LEGACY\"");

    let parsed: OutputPrefixType = serde_json::from_str("\"CRUNCHY\"").unwrap();
    assert_eq!(parsed, OutputPrefixType::Crunchy);
}

#[test]
fn defaults_are_unknown_wire_values() {
    assert_eq!(OutputPrefixType::default(), OutputPrefixType::UnknownPrefix);
    assert_eq!(KeyStatus::default(), KeyStatus::Unknown);
    assert_eq!(KeyStatus::Enabled.to_string(), "ENABLED");
}

// ============================================================================
// Key Material Tests
// ============================================================================

fn hmac_key() -> HmacKey {
    HmacKey {
        version: 0,
        params: HmacParams {
            hash: HashType::Sha256,
            tag_size: 16,
        },
        key_value: vec![0xAB; 32],
    }
}

#[test]
fn debug_output_redacts_secret_bytes() {
    let rendered = format!("{:?}", hmac_key());
    assert!(rendered.contains("REDACTED"));
    assert!(!rendered.contains("171"));
}

#[test]
fn key_data_derives_material_type() {
    let data = KeyData::new("type.keystack.dev/keystack.HmacKey", KeyMaterial::Hmac(hmac_key()));
    assert_eq!(data.key_material_type, KeyMaterialType::Symmetric);
    assert_eq!(data.value.kind_name(), "HmacKey");
}

#[test]
fn key_material_survives_json() {
    let material = KeyMaterial::Hmac(hmac_key());
    let json = serde_json::to_string(&material).unwrap();
    let parsed: KeyMaterial = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, material);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn error_message_strips_kind() {
    let err = KeystackError::invalid_argument("verification failed");
    assert_eq!(err.message(), "verification failed");
    assert_eq!(err.to_string(), "invalid argument: verification failed");
}

// ============================================================================
// Property-Based Tests
// ============================================================================

use proptest::prelude::*;

proptest! {
    /// Property: big-endian bytes always decode back to the same id
    #[test]
    fn prop_key_id_be_bytes_roundtrip(raw in any::<u32>()) {
        let id = KeyId::new(raw);
        prop_assert_eq!(u32::from_be_bytes(id.to_be_bytes()), raw);
    }
}
