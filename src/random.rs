//! Random bytes and uniformly distributed integers from the OS CSPRNG

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// libsodium's `crypto_kdf_KEYBYTES` (BLAKE2b master key length)
pub const KDF_KEY_LEN: usize = 32;

pub fn bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// A value in `[0, upper_bound)`, or 0 when `upper_bound < 2`.
pub fn uniform(upper_bound: u32) -> u32 {
    if upper_bound < 2 {
        return 0;
    }
    OsRng.gen_range(0..upper_bound)
}

/// Generate a random master key for key derivation
pub fn kdf_keygen() -> Vec<u8> {
    bytes(KDF_KEY_LEN)
}
