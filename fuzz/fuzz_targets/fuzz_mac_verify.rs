#![no_main]

use keystack::{
    Key, KeyId, KeyStatus, Keyset, KeysetHandle, Mac, MacWrapper, OutputPrefixType, Registry,
    templates,
};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

/// One key per prefix type; the TINK key is primary.
static MAC: Lazy<MacWrapper> = Lazy::new(|| {
    let registry = Registry::with_defaults().expect("default registry");
    let keys = [
        (1, OutputPrefixType::Raw),
        (2, OutputPrefixType::Legacy),
        (3, OutputPrefixType::Tink),
        (4, OutputPrefixType::Crunchy),
    ]
    .into_iter()
    .map(|(id, output_prefix_type)| Key {
        key_data: Some(
            registry
                .new_key_data(&templates::hmac_sha256())
                .expect("hmac key"),
        ),
        status: KeyStatus::Enabled,
        key_id: KeyId::new(id),
        output_prefix_type,
    })
    .collect();
    let handle = KeysetHandle::new(Keyset {
        primary_key_id: KeyId::new(3),
        keys,
    })
    .expect("valid keyset");
    registry.new_mac(&handle).expect("mac wrapper")
});

fuzz_target!(|data: &[u8]| {
    // First byte picks where the tag ends and the message starts.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (tag, message) = rest.split_at(split);

    // Arbitrary tags must never verify or panic.
    assert!(MAC.verify_mac(tag, message).is_err(), "forged tag accepted");

    let genuine = MAC.compute_mac(message).expect("compute");
    assert!(MAC.verify_mac(&genuine, message).is_ok());
});
