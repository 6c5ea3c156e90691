#![no_main]

use keystack::{
    KeysetHandle, PublicKeySign, PublicKeySignWrapper, PublicKeyVerify, PublicKeyVerifyWrapper,
    Registry, templates,
};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

struct Pair {
    signer: PublicKeySignWrapper,
    verifier: PublicKeyVerifyWrapper,
}

static PAIR: Lazy<Pair> = Lazy::new(|| {
    let registry = Registry::with_defaults().expect("default registry");
    let private =
        KeysetHandle::generate_new(&registry, &templates::ecdsa_p256()).expect("ecdsa keyset");
    let public = private
        .public_keyset_handle(&registry)
        .expect("public keyset");
    Pair {
        signer: registry.new_public_key_sign(&private).expect("signer"),
        verifier: registry.new_public_key_verify(&public).expect("verifier"),
    }
});

fuzz_target!(|data: &[u8]| {
    // Untrusted DER must be rejected cleanly.
    let _ = PAIR.verifier.verify(data, b"fuzz");

    let signature = PAIR.signer.sign(data).expect("sign");
    assert!(PAIR.verifier.verify(&signature, data).is_ok());

    if let Some((last, body)) = signature.split_last() {
        let mut tampered = body.to_vec();
        tampered.push(last ^ 0x01);
        assert!(PAIR.verifier.verify(&tampered, data).is_err());
    }
});
