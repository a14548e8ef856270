//! Password hashing (key derivation from a password) using Argon2
//!
//! Limits follow libsodium's conventions: `opslimit` is the number of passes,
//! `memlimit` is in bytes, parallelism is always 1 and the Argon2 version is
//! 0x13.

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use argon2::{Algorithm, Argon2, Params, Version};

/// Length of a pwhash salt in bytes
pub const SALT_LEN: usize = argon2::RECOMMENDED_SALT_LEN;

/// libsodium's `crypto_pwhash_ALG_ARGON2I13`
pub const ALG_ARGON2I13: u32 = Algorithm::Argon2i as u32;

/// libsodium's `crypto_pwhash_ALG_ARGON2ID13`
pub const ALG_ARGON2ID13: u32 = Algorithm::Argon2id as u32;

pub const ALG_DEFAULT: u32 = ALG_ARGON2ID13;

/// Passes for interactive use (libsodium `OPSLIMIT_INTERACTIVE`)
pub const OPSLIMIT_INTERACTIVE: u32 = 2;

/// Memory in bytes for interactive use (libsodium `MEMLIMIT_INTERACTIVE`)
pub const MEMLIMIT_INTERACTIVE: u64 = 64 * 1024 * 1024;

/// Shortest derived key (libsodium `crypto_pwhash_BYTES_MIN`)
pub const BYTES_MIN: usize = 16;

/// Longest derived key (libsodium `crypto_pwhash_BYTES_MAX`)
pub const BYTES_MAX: usize = u32::MAX as usize;

/// Smallest accepted memory limit in bytes (libsodium `MEMLIMIT_MIN`)
pub const MEMLIMIT_MIN: u64 = 8192;

const PARALLELISM: u32 = 1;

/// Fewest passes libsodium accepts for `alg`. Argon2i needs at least 3 to
/// resist tradeoff attacks; Argon2id accepts 1.
pub fn opslimit_min(alg: Algorithm) -> u32 {
    match alg {
        Algorithm::Argon2i => 3,
        _ => 1,
    }
}

fn below_limit(msg: String) -> BridgeError {
    BridgeError::with_kind(ErrorCategory::User, ErrorKind::InvalidArgument, msg)
}

fn check_limits(key_len: usize, opslimit: u32, memlimit: u64, alg: Algorithm) -> Result<()> {
    if !(BYTES_MIN..=BYTES_MAX).contains(&key_len) {
        return Err(below_limit(format!(
            "keyLength must be between {} and {} bytes",
            BYTES_MIN, BYTES_MAX
        )));
    }
    if opslimit < opslimit_min(alg) {
        return Err(below_limit(format!(
            "opsLimit must be at least {} for {:?}",
            opslimit_min(alg),
            alg
        )));
    }
    if memlimit < MEMLIMIT_MIN {
        return Err(below_limit(format!(
            "memLimit must be at least {} bytes",
            MEMLIMIT_MIN
        )));
    }
    Ok(())
}

/// Map a libsodium algorithm identifier onto an Argon2 variant
pub fn algorithm(id: u32) -> Option<Algorithm> {
    match id {
        ALG_ARGON2I13 => Some(Algorithm::Argon2i),
        ALG_ARGON2ID13 => Some(Algorithm::Argon2id),
        _ => None,
    }
}

/// Derive `key_len` bytes from `password` and `salt`
///
/// Limits below libsodium's minimums are rejected as `InvalidArgument`
/// before Argon2 sees them.
pub fn derive_key(
    key_len: usize,
    password: &[u8],
    salt: &[u8; SALT_LEN],
    opslimit: u32,
    memlimit: u64,
    alg: Algorithm,
) -> Result<Vec<u8>> {
    check_limits(key_len, opslimit, memlimit, alg)?;

    let m_cost = u32::try_from(memlimit / 1024).map_err(|e| {
        BridgeError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::PasswordHash,
            "memory limit too large",
            e,
        )
    })?;

    let params = Params::new(m_cost, opslimit, PARALLELISM, Some(key_len)).map_err(|e| {
        BridgeError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::PasswordHash,
            format!("invalid argon2 parameters: {}", e),
            e,
        )
    })?;

    let mut key = vec![0u8; key_len];
    Argon2::new(alg, Version::V0x13, params)
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| {
            BridgeError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::PasswordHash,
                format!("argon2 key derivation failed: {}", e),
                e,
            )
        })?;

    Ok(key)
}
