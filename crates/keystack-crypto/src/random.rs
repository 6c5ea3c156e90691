//! OS-backed randomness.

use rand::RngCore;
use rand::rngs::OsRng;

/// Returns `len` bytes from the operating system CSPRNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Returns a uniformly random `u32`, used for fresh key ids.
pub fn random_u32() -> u32 {
    OsRng.next_u32()
}
