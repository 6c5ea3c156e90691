#![no_main]

use arbitrary::Arbitrary;
use keystack::{
    Aead, Key, KeyId, KeyStatus, Keyset, KeysetHandle, OutputPrefixType, Registry, templates,
};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static REGISTRY: Lazy<Registry> =
    Lazy::new(|| Registry::with_defaults().expect("default registry"));

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzPrefix {
    Raw,
    Legacy,
    Tink,
    Crunchy,
}

impl From<FuzzPrefix> for OutputPrefixType {
    fn from(prefix: FuzzPrefix) -> Self {
        match prefix {
            FuzzPrefix::Raw => OutputPrefixType::Raw,
            FuzzPrefix::Legacy => OutputPrefixType::Legacy,
            FuzzPrefix::Tink => OutputPrefixType::Tink,
            FuzzPrefix::Crunchy => OutputPrefixType::Crunchy,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    prefixes: Vec<FuzzPrefix>,
    primary: u8,
    plaintext: Vec<u8>,
    associated_data: Vec<u8>,
    flip: u16,
}

fuzz_target!(|input: Input| {
    if input.prefixes.is_empty() || input.prefixes.len() > 8 {
        return;
    }

    let keys: Vec<Key> = input
        .prefixes
        .iter()
        .zip(1u32..)
        .map(|(&prefix, id)| Key {
            key_data: Some(
                REGISTRY
                    .new_key_data(&templates::aes128_gcm())
                    .expect("aes key"),
            ),
            status: KeyStatus::Enabled,
            key_id: KeyId::new(id),
            output_prefix_type: prefix.into(),
        })
        .collect();
    let primary = u32::from(input.primary) % u32::try_from(keys.len()).expect("small") + 1;
    let handle = KeysetHandle::new(Keyset {
        primary_key_id: KeyId::new(primary),
        keys,
    })
    .expect("valid keyset");
    let aead = REGISTRY.new_aead(&handle).expect("aead wrapper");

    let ciphertext = aead
        .encrypt(&input.plaintext, &input.associated_data)
        .expect("encrypt");
    let decrypted = aead
        .decrypt(&ciphertext, &input.associated_data)
        .expect("decrypt");
    assert_eq!(decrypted, input.plaintext);

    let mut tampered = ciphertext;
    let index = usize::from(input.flip) % tampered.len();
    tampered[index] ^= 0x80;
    assert!(aead.decrypt(&tampered, &input.associated_data).is_err());
});
